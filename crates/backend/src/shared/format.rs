/// Форматирует число с разделителями тысяч (точками): 1234567 -> "1.234.567"
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Человекочитаемый размер для сообщений об ошибках загрузки
pub fn format_bytes(n: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    if n >= MB && n % MB == 0 {
        format!("{} МБ", n / MB)
    } else if n >= KB {
        format!("{} КБ", format_number(n / KB))
    } else {
        format!("{} Б", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 Б");
        assert_eq!(format_bytes(2048), "2 КБ");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10 МБ");
        assert_eq!(format_bytes(1536 * 1024 + 1), "1.536 КБ");
    }
}
