use crate::MongoDb;

use super::AbstractMigrations;

#[async_trait]
impl AbstractMigrations for MongoDb {
    #[cfg(test)]
    /// Drop the database
    async fn drop_database(&self) {
        self.db().drop().await.ok();
    }

    /// Migrate the database
    async fn migrate_database(&self) -> Result<(), ()> {
        info!("Migrating the database.");

        let list = self
            .list_database_names()
            .await
            .expect("Failed to fetch database names.");

        if !list.iter().any(|x| x == &self.1) {
            create_database(self).await;
        }

        Ok(())
    }
}

async fn create_database(db: &MongoDb) {
    info!("Creating database.");
    let db = db.db();

    db.create_collection("users")
        .await
        .expect("Failed to create users collection.");

    db.create_collection("posts")
        .await
        .expect("Failed to create posts collection.");

    db.create_collection("comments")
        .await
        .expect("Failed to create comments collection.");

    db.create_collection("reports")
        .await
        .expect("Failed to create reports collection.");

    // The application also checks for an existing open report before
    // inserting, but only this index closes the check-then-insert race
    // between two identical concurrent reports.
    db.run_command(doc! {
        "createIndexes": "reports",
        "indexes": [
            {
                "key": {
                    "author_id": 1_i32,
                    "target.type": 1_i32,
                    "target.id": 1_i32
                },
                "name": "one_open_report_per_target",
                "unique": true,
                "partialFilterExpression": {
                    "status": {
                        "$in": ["Pending", "Reviewed"]
                    }
                }
            }
        ]
    })
    .await
    .expect("Failed to create report index.");

    db.run_command(doc! {
        "createIndexes": "users",
        "indexes": [
            {
                "key": {
                    "token": 1_i32
                },
                "name": "token",
                "unique": false
            }
        ]
    })
    .await
    .expect("Failed to create token index.");
}
