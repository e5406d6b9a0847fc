//! Session collaborator boundary.
//!
//! Statement execution and transactions live outside this crate. Repositories
//! built on the correlated metadata reach a store through these traits: either a
//! runner acquired per unit of work, or one the caller already holds inside an
//! explicit transaction.

use crate::error::Result;
use crate::registry::EntityGraph;
use std::sync::Arc;
use tracing::debug;

/// A handle able to execute statements and take part in a transaction.
pub trait QueryRunner {
    /// Execute a statement, returning the number of affected rows.
    fn query(&mut self, statement: &str) -> Result<u64>;

    /// Begin a transaction.
    fn start_transaction(&mut self) -> Result<()>;

    /// Commit the active transaction.
    fn commit_transaction(&mut self) -> Result<()>;

    /// Roll back the active transaction.
    fn rollback_transaction(&mut self) -> Result<()>;

    /// Check if a transaction is active.
    fn is_transaction_active(&self) -> bool;
}

/// Supplies query runners, e.g. from a connection pool.
pub trait RunnerSource {
    /// Runner type handed out.
    type Runner: QueryRunner;

    /// Acquire a runner, from the named connection or the default one.
    fn acquire(&self, connection: Option<&str>) -> Result<Self::Runner>;
}

/// A repository bound to one runner.
pub trait Repository<R: QueryRunner>: Sized {
    /// Create the repository.
    fn new(runner: R, graph: Arc<EntityGraph>) -> Self;
}

/// Where a repository gets its runner from.
#[derive(Debug)]
pub enum RunnerBinding<'a, R> {
    /// Acquire a fresh runner from the source, optionally by connection name.
    Pooled(Option<&'a str>),
    /// Use the caller's runner, typically inside an explicit transaction.
    Explicit(R),
}

impl<R> Default for RunnerBinding<'_, R> {
    fn default() -> Self {
        RunnerBinding::Pooled(None)
    }
}

/// Create a repository bound to a runner chosen by `binding`.
pub fn prepare_repository<Repo, S>(
    source: &S,
    graph: &Arc<EntityGraph>,
    binding: RunnerBinding<'_, S::Runner>,
) -> Result<Repo>
where
    S: RunnerSource,
    Repo: Repository<S::Runner>,
{
    let runner = match binding {
        RunnerBinding::Pooled(connection) => {
            debug!(connection = connection.unwrap_or("default"), "acquiring runner");
            source.acquire(connection)?
        }
        RunnerBinding::Explicit(runner) => runner,
    };
    Ok(Repo::new(runner, Arc::clone(graph)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::ColumnOptions;
    use crate::error::Error;
    use crate::metadata::EntityMetadata;
    use crate::registry::MetadataRegistry;
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct Log {
        statements: Vec<String>,
        in_transaction: bool,
    }

    /// Runner sharing its log between clones, so one transaction can span
    /// several repositories.
    #[derive(Debug, Clone, Default)]
    struct MemoryRunner {
        connection: String,
        log: Arc<Mutex<Log>>,
    }

    impl QueryRunner for MemoryRunner {
        fn query(&mut self, statement: &str) -> Result<u64> {
            self.log.lock().statements.push(statement.to_string());
            Ok(1)
        }

        fn start_transaction(&mut self) -> Result<()> {
            let mut log = self.log.lock();
            if log.in_transaction {
                return Err(Error::Session("transaction already started".into()));
            }
            log.in_transaction = true;
            log.statements.push("BEGIN".into());
            Ok(())
        }

        fn commit_transaction(&mut self) -> Result<()> {
            let mut log = self.log.lock();
            if !log.in_transaction {
                return Err(Error::Session("no active transaction".into()));
            }
            log.in_transaction = false;
            log.statements.push("COMMIT".into());
            Ok(())
        }

        fn rollback_transaction(&mut self) -> Result<()> {
            let mut log = self.log.lock();
            if !log.in_transaction {
                return Err(Error::Session("no active transaction".into()));
            }
            log.in_transaction = false;
            log.statements.push("ROLLBACK".into());
            Ok(())
        }

        fn is_transaction_active(&self) -> bool {
            self.log.lock().in_transaction
        }
    }

    #[derive(Default)]
    struct MemorySource {
        acquired: Mutex<Vec<String>>,
    }

    impl RunnerSource for MemorySource {
        type Runner = MemoryRunner;

        fn acquire(&self, connection: Option<&str>) -> Result<MemoryRunner> {
            let name = connection.unwrap_or("default").to_string();
            self.acquired.lock().push(name.clone());
            Ok(MemoryRunner {
                connection: name,
                log: Arc::default(),
            })
        }
    }

    struct UserRepository {
        runner: MemoryRunner,
        graph: Arc<EntityGraph>,
    }

    impl Repository<MemoryRunner> for UserRepository {
        fn new(runner: MemoryRunner, graph: Arc<EntityGraph>) -> Self {
            Self { runner, graph }
        }
    }

    impl UserRepository {
        fn entity(&self) -> &EntityMetadata {
            self.graph.entity_by_name("User").unwrap()
        }

        fn save(&mut self) -> Result<u64> {
            let columns: Vec<&str> = self
                .entity()
                .columns
                .iter()
                .map(|c| c.database_name.as_str())
                .collect();
            let statement = format!("INSERT INTO user ({})", columns.join(", "));
            self.runner.query(&statement)
        }
    }

    fn user_graph() -> Arc<EntityGraph> {
        let registry = MetadataRegistry::new();
        let user = registry.declare_root("User");
        registry.register_entity(user).unwrap();
        registry.primary_column(user, "id", ColumnOptions::new());
        registry.column(user, "name", ColumnOptions::new());
        Arc::new(registry.finish())
    }

    #[test]
    fn test_pooled_binding_acquires_runner() {
        let graph = user_graph();
        let source = MemorySource::default();

        let mut repo: UserRepository =
            prepare_repository(&source, &graph, RunnerBinding::Pooled(Some("replica"))).unwrap();
        repo.save().unwrap();

        assert_eq!(*source.acquired.lock(), vec!["replica".to_string()]);
        assert_eq!(repo.runner.connection, "replica");
        assert_eq!(
            repo.runner.log.lock().statements,
            vec!["INSERT INTO user (id, name)".to_string()]
        );
    }

    #[test]
    fn test_explicit_runner_shares_transaction() {
        let graph = user_graph();
        let source = MemorySource::default();
        let mut tx = source.acquire(None).unwrap();
        tx.start_transaction().unwrap();

        let mut first: UserRepository =
            prepare_repository(&source, &graph, RunnerBinding::Explicit(tx.clone())).unwrap();
        let mut second: UserRepository =
            prepare_repository(&source, &graph, RunnerBinding::Explicit(tx.clone())).unwrap();
        first.save().unwrap();
        second.save().unwrap();
        assert!(first.runner.is_transaction_active());

        tx.commit_transaction().unwrap();
        assert!(tx.rollback_transaction().is_err());

        assert_eq!(source.acquired.lock().len(), 1);
        assert_eq!(tx.log.lock().statements.len(), 4);
        assert_eq!(tx.log.lock().statements.last().map(String::as_str), Some("COMMIT"));
    }

    #[test]
    fn test_default_binding_is_pooled() {
        let binding: RunnerBinding<'_, MemoryRunner> = RunnerBinding::default();
        assert!(matches!(binding, RunnerBinding::Pooled(None)));
    }
}
