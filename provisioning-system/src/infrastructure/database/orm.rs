use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sea_orm::{ConnectionTrait, Statement, TransactionTrait};
use tokio::sync::Mutex;
use typed_builder::TypedBuilder;

use super::Database;

/// sea-orm unit of work. Writes are buffered and committed together by `save_changed`.
#[derive(TypedBuilder)]
pub struct OrmRepo {
    pub db: Arc<Database>,
    #[builder(default)]
    pub statements: Arc<Mutex<Vec<Statement>>>,
    #[builder(default = AtomicBool::new(true))]
    pub can_drop: AtomicBool,
}

impl OrmRepo {
    pub async fn push(&self, statements: impl IntoIterator<Item = Statement>) {
        let mut buffered = self.statements.lock().await;
        buffered.extend(statements);
        self.can_drop.store(false, Ordering::Relaxed);
    }

    pub async fn save_changed(&self) -> anyhow::Result<bool> {
        if self.can_drop.load(Ordering::Relaxed) {
            return Ok(false);
        }
        let mut stmts = self.statements.lock().await;
        let trans = self.db.get_connection().begin().await?;
        for stmt in stmts.iter() {
            if let Err(e) = trans.execute(stmt.clone()).await {
                trans.rollback().await?;
                stmts.clear();
                self.can_drop.store(true, Ordering::Relaxed);
                anyhow::bail!(e);
            }
        }
        trans.commit().await?;
        self.can_drop.store(true, Ordering::Relaxed);
        stmts.clear();
        Ok(true)
    }
}

impl Drop for OrmRepo {
    fn drop(&mut self) {
        if !self.can_drop.load(Ordering::Relaxed) {
            if let Ok(stmts) = self.statements.try_lock() {
                let sqls = stmts.iter().map(|x| x.to_string()).collect::<Vec<String>>().join("\n");
                tracing::warn!("Unsaved sql statements dropped:\n{sqls}");
            }
        }
    }
}
