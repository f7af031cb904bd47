use anyhow::Result;

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_dto = CreateUserDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            full_name: Some("Administrator".to_string()),
            is_admin: true,
        };

        let admin_id = service::create(admin_dto).await?;

        tracing::warn!("Default admin user created (admin/admin), id {}", admin_id);
        tracing::warn!("Please change the password immediately");
    }

    Ok(())
}

/// Seed the demo catalog when it is empty, so the content selector has data
pub async fn ensure_demo_catalog() -> Result<()> {
    use crate::domain::a002_content_entity::service;

    if service::count().await? == 0 {
        tracing::info!("Content catalog is empty, inserting demo entities");
        service::insert_test_data().await?;
    }
    Ok(())
}
