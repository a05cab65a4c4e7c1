//! Mock provisioner for executor and HTTP tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::ConnectionProvisioner;
use crate::db::{DatabaseClient, FailingDatabaseClient, MockDatabaseClient, QueryResult};
use crate::error::{Result, SqlgateError};

/// What a provisioned mock connection does.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Echo SELECT statements, return an empty result for anything else.
    Echo,
    /// Answer every statement with this result.
    Returns(QueryResult),
    /// Connect fine, then fail every statement with this message.
    QueryFails(String),
    /// Connect fine, then never finish the statement.
    Stalls,
    /// Fail to provision at all.
    Unavailable,
}

/// Provisioner that hands out mock clients and counts what happens to them.
#[derive(Debug, Clone)]
pub struct MockProvisioner {
    behavior: MockBehavior,
    provisions: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl MockProvisioner {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            provisions: Arc::default(),
            closes: Arc::default(),
            drops: Arc::default(),
        }
    }

    /// Number of connections handed out.
    pub fn provisions(&self) -> usize {
        self.provisions.load(Ordering::SeqCst)
    }

    /// Number of `close` calls across all handed-out connections.
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Number of handed-out mock connections that have been dropped.
    ///
    /// `FailingDatabaseClient` connections are not tracked here.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    fn mock_client(&self, client: MockDatabaseClient) -> Box<dyn DatabaseClient> {
        Box::new(
            client
                .with_close_counter(self.closes.clone())
                .with_drop_counter(self.drops.clone()),
        )
    }
}

#[async_trait]
impl ConnectionProvisioner for MockProvisioner {
    async fn provision(&self) -> Result<Box<dyn DatabaseClient>> {
        let client: Box<dyn DatabaseClient> = match &self.behavior {
            MockBehavior::Unavailable => return Err(SqlgateError::connection_unavailable()),
            MockBehavior::Echo => self.mock_client(MockDatabaseClient::new()),
            MockBehavior::Returns(result) => {
                self.mock_client(MockDatabaseClient::with_result(result.clone()))
            }
            MockBehavior::Stalls => self.mock_client(MockDatabaseClient::stalled()),
            MockBehavior::QueryFails(message) => Box::new(
                FailingDatabaseClient::new(message.clone())
                    .with_close_counter(self.closes.clone()),
            ),
        };
        self.provisions.fetch_add(1, Ordering::SeqCst);
        Ok(client)
    }
}
