use super::aggregate::{GridConfiguration, PositionUpdate};
use super::save::GridConfigurationStore;

/// Элемент упорядоченного списка
pub trait Positioned: Clone {
    fn position_id(&self) -> String;
    fn position(&self) -> i32;
    fn set_position(&mut self, position: i32);
}

impl Positioned for GridConfiguration {
    fn position_id(&self) -> String {
        self.to_string_id()
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

/// План перестановки: новый порядок для оптимистичного отображения,
/// снимок для отката и список изменившихся позиций для сохранения.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan<T> {
    pub snapshot: Vec<T>,
    pub reordered: Vec<T>,
    pub updates: Vec<PositionUpdate>,
}

impl<T: Positioned> ReorderPlan<T> {
    /// Переместить элемент с индекса `from` на индекс `to`.
    ///
    /// Элементы получают тот же набор позиций, что был у списка, в новом
    /// порядке. Если позиции повторяются, они пересчитываются подряд от минимальной.
    pub fn new(list: &[T], from: usize, to: usize) -> Option<Self> {
        if from == to || from >= list.len() || to >= list.len() {
            return None;
        }

        let mut slots: Vec<i32> = list.iter().map(Positioned::position).collect();
        slots.sort_unstable();
        let distinct = slots.windows(2).all(|w| w[0] < w[1]);
        if !distinct {
            let base = slots.first().copied().unwrap_or(0);
            slots = (0..list.len() as i32).map(|i| base + i).collect();
        }

        let mut reordered = list.to_vec();
        let moved = reordered.remove(from);
        reordered.insert(to, moved);

        let mut updates = Vec::new();
        for (item, slot) in reordered.iter_mut().zip(slots) {
            if item.position() != slot {
                item.set_position(slot);
                updates.push(PositionUpdate {
                    id: item.position_id(),
                    position: slot,
                });
            }
        }

        Some(Self {
            snapshot: list.to_vec(),
            reordered,
            updates,
        })
    }
}

/// Сохранить перестановку. При ошибке возвращается снимок для отката.
pub async fn persist_reorder<T, S>(
    plan: ReorderPlan<T>,
    store: &S,
) -> Result<Vec<T>, (Vec<T>, String)>
where
    T: Positioned,
    S: GridConfigurationStore,
{
    if plan.updates.is_empty() {
        return Ok(plan.reordered);
    }
    match store.update_positions(&plan.updates).await {
        Ok(()) => Ok(plan.reordered),
        Err(e) => Err((plan.snapshot, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_grid_configuration::aggregate::GridConfigurationDto;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: &'static str,
        position: i32,
    }

    impl Positioned for Row {
        fn position_id(&self) -> String {
            self.id.to_string()
        }

        fn position(&self) -> i32 {
            self.position
        }

        fn set_position(&mut self, position: i32) {
            self.position = position;
        }
    }

    fn rows(positions: &[(&'static str, i32)]) -> Vec<Row> {
        positions
            .iter()
            .map(|&(id, position)| Row { id, position })
            .collect()
    }

    fn order(list: &[Row]) -> Vec<&'static str> {
        list.iter().map(|r| r.id).collect()
    }

    struct Store {
        fail: bool,
        calls: RefCell<Vec<Vec<PositionUpdate>>>,
    }

    #[async_trait(?Send)]
    impl GridConfigurationStore for Store {
        async fn create(&self, _dto: &GridConfigurationDto) -> Result<String, String> {
            unreachable!()
        }

        async fn update(&self, _id: &str, _dto: &GridConfigurationDto) -> Result<(), String> {
            unreachable!()
        }

        async fn update_positions(&self, updates: &[PositionUpdate]) -> Result<(), String> {
            self.calls.borrow_mut().push(updates.to_vec());
            if self.fail {
                Err("timeout".into())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_move_down_renumbers_affected_items() {
        let list = rows(&[("a", 0), ("b", 1), ("c", 2), ("d", 3)]);
        let plan = ReorderPlan::new(&list, 0, 2).unwrap();
        assert_eq!(order(&plan.reordered), vec!["b", "c", "a", "d"]);
        assert_eq!(
            plan.reordered.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(
            plan.updates,
            vec![
                PositionUpdate { id: "b".into(), position: 0 },
                PositionUpdate { id: "c".into(), position: 1 },
                PositionUpdate { id: "a".into(), position: 2 },
            ]
        );
        assert_eq!(plan.snapshot, list);
    }

    #[test]
    fn test_page_offset_positions_are_reused() {
        let list = rows(&[("x", 20), ("y", 21), ("z", 25)]);
        let plan = ReorderPlan::new(&list, 2, 0).unwrap();
        assert_eq!(order(&plan.reordered), vec!["z", "x", "y"]);
        assert_eq!(
            plan.reordered.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![20, 21, 25]
        );
    }

    #[test]
    fn test_duplicate_positions_are_spread() {
        let list = rows(&[("a", 0), ("b", 0), ("c", 0)]);
        let plan = ReorderPlan::new(&list, 2, 0).unwrap();
        assert_eq!(
            plan.reordered.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(plan.updates.len(), 2);
    }

    #[test]
    fn test_noop_moves_are_rejected() {
        let list = rows(&[("a", 0), ("b", 1)]);
        assert!(ReorderPlan::new(&list, 1, 1).is_none());
        assert!(ReorderPlan::new(&list, 0, 5).is_none());
    }

    #[test]
    fn test_failed_persist_returns_snapshot() {
        let list = rows(&[("a", 0), ("b", 1), ("c", 2)]);
        let plan = ReorderPlan::new(&list, 0, 1).unwrap();
        let store = Store {
            fail: true,
            calls: RefCell::new(Vec::new()),
        };
        let result = block_on(persist_reorder(plan, &store));
        let (restored, error) = result.unwrap_err();
        assert_eq!(restored, list);
        assert_eq!(error, "timeout");
        assert_eq!(store.calls.borrow().len(), 1);
    }

    #[test]
    fn test_successful_persist_keeps_new_order() {
        let list = rows(&[("a", 0), ("b", 1), ("c", 2)]);
        let plan = ReorderPlan::new(&list, 2, 1).unwrap();
        let store = Store {
            fail: false,
            calls: RefCell::new(Vec::new()),
        };
        let result = block_on(persist_reorder(plan, &store)).unwrap();
        assert_eq!(order(&result), vec!["a", "c", "b"]);
        assert_eq!(store.calls.borrow()[0].len(), 2);
    }
}
