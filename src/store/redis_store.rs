//! Redis-backed store over a single synchronous connection

use crate::store::command::{StoreCommand, StoreReply};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::Store;
use redis::{Client, Cmd, Connection, FromRedisValue, Value};
use std::sync::{Mutex, MutexGuard};

/// Store implementation talking to a Redis server
///
/// Calls are serialized over one connection. Callers that want parallel
/// round trips should open one `RedisStore` per thread.
pub struct RedisStore {
    connection: Mutex<Connection>,
    url: String,
}

impl RedisStore {
    /// Open a connection to the server at `url` (e.g. `redis://127.0.0.1/`)
    pub fn connect(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)?;
        let connection = client.get_connection()?;
        log::debug!("Connected to redis store at {}", url);
        Ok(Self::from_connection(connection, url))
    }

    /// Wrap an already established connection
    pub fn from_connection(connection: Connection, url: &str) -> Self {
        Self {
            connection: Mutex::new(connection),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|_| StoreError::Unavailable {
            message: format!("connection to {} poisoned by a panicking caller", self.url),
        })
    }

    fn query<T: FromRedisValue>(&self, command: &StoreCommand) -> StoreResult<T> {
        let mut connection = self.lock()?;
        let value = to_cmd(command).query(&mut *connection)?;
        Ok(value)
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").field("url", &self.url).finish()
    }
}

fn to_cmd(command: &StoreCommand) -> Cmd {
    let mut cmd = redis::cmd(command.name());
    match command {
        StoreCommand::ListPushHead { key, values } | StoreCommand::ListPushTail { key, values } => {
            cmd.arg(key).arg(values);
        }
        StoreCommand::ListPopHead { key }
        | StoreCommand::ListPopTail { key }
        | StoreCommand::ListLength { key } => {
            cmd.arg(key);
        }
        StoreCommand::ListRange { key, from, to } => {
            cmd.arg(key).arg(*from).arg(*to);
        }
        StoreCommand::SetAdd { key, value } => {
            cmd.arg(key).arg(value);
        }
        StoreCommand::DeleteKeys { keys } => {
            cmd.arg(keys);
        }
    }
    cmd
}

/// Decode a raw pipeline reply according to the command that produced it
fn decode(command: &StoreCommand, value: &Value) -> StoreResult<StoreReply> {
    let reply = match command {
        StoreCommand::ListPopHead { .. } | StoreCommand::ListPopTail { .. } => {
            StoreReply::Element(redis::from_redis_value(value)?)
        }
        StoreCommand::ListRange { .. } => StoreReply::Elements(redis::from_redis_value(value)?),
        StoreCommand::ListPushHead { .. }
        | StoreCommand::ListPushTail { .. }
        | StoreCommand::ListLength { .. }
        | StoreCommand::SetAdd { .. }
        | StoreCommand::DeleteKeys { .. } => StoreReply::Count(redis::from_redis_value(value)?),
    };
    Ok(reply)
}

impl Store for RedisStore {
    fn list_push_head(&self, key: &str, values: &[String]) -> StoreResult<u64> {
        self.query(&StoreCommand::ListPushHead {
            key: key.to_string(),
            values: values.to_vec(),
        })
    }

    fn list_push_tail(&self, key: &str, values: &[String]) -> StoreResult<u64> {
        self.query(&StoreCommand::ListPushTail {
            key: key.to_string(),
            values: values.to_vec(),
        })
    }

    fn list_pop_head(&self, key: &str) -> StoreResult<Option<String>> {
        self.query(&StoreCommand::ListPopHead {
            key: key.to_string(),
        })
    }

    fn list_pop_tail(&self, key: &str) -> StoreResult<Option<String>> {
        self.query(&StoreCommand::ListPopTail {
            key: key.to_string(),
        })
    }

    fn list_length(&self, key: &str) -> StoreResult<u64> {
        self.query(&StoreCommand::ListLength {
            key: key.to_string(),
        })
    }

    fn list_range(&self, key: &str, from: i64, to: i64) -> StoreResult<Vec<String>> {
        self.query(&StoreCommand::ListRange {
            key: key.to_string(),
            from,
            to,
        })
    }

    fn set_add(&self, key: &str, value: &str) -> StoreResult<u64> {
        self.query(&StoreCommand::SetAdd {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    fn delete_keys(&self, keys: &[String]) -> StoreResult<u64> {
        self.query(&StoreCommand::DeleteKeys {
            keys: keys.to_vec(),
        })
    }

    fn pipeline(&self, commands: &[StoreCommand]) -> StoreResult<Vec<StoreReply>> {
        if commands.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for command in commands {
            pipe.add_command(to_cmd(command));
        }

        let values: Vec<Value> = {
            let mut connection = self.lock()?;
            pipe.query(&mut *connection)?
        };

        if values.len() != commands.len() {
            return Err(StoreError::UnexpectedReply {
                command: "pipeline",
                expected: "one reply per command",
            });
        }

        commands
            .iter()
            .zip(values.iter())
            .map(|(command, value)| decode(command, value))
            .collect()
    }
}
