use crate::entities::prelude::*;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Auto-migration logic
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Create tables if not exist
    let stmt = schema
        .create_table_from_entity(Organizations)
        .if_not_exists()
        .to_owned();
    match db.execute(&stmt).await {
        Ok(_) => tracing::info!("Ensured table organizations exists"),
        Err(e) => tracing::warn!("Failed to create table organizations: {}", e),
    }

    let stmt = schema
        .create_table_from_entity(Departments)
        .if_not_exists()
        .to_owned();
    match db.execute(&stmt).await {
        Ok(_) => tracing::info!("Ensured table departments exists"),
        Err(e) => tracing::warn!("Failed to create table departments: {}", e),
    }

    let stmt = schema
        .create_table_from_entity(TeamMembers)
        .if_not_exists()
        .to_owned();
    match db.execute(&stmt).await {
        Ok(_) => tracing::info!("Ensured table team_members exists"),
        Err(e) => tracing::warn!("Failed to create table team_members: {}", e),
    }

    Ok(db)
}
