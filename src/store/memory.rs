//! In-process store with Redis list and set semantics
//!
//! Used by the test suites and by callers that want queue semantics without
//! a server. Behaviour follows Redis where it matters to the queues:
//!
//! - a multi-value head push inserts values one at a time, so they end up
//!   reversed at the head of the list
//! - a list that becomes empty is removed, like Redis does
//! - range indices are clamped and negative indices count from the tail
//! - list commands on a set key (and the reverse) fail with `WrongType`
//! - a push without values fails with `WrongArity`

use crate::store::command::{StoreCommand, StoreReply};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::Store;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
enum Entry {
    List(VecDeque<String>),
    Set(HashSet<String>),
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a list or set
    pub fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.lock()?.contains_key(key))
    }

    /// Members of the set at `key`, sorted; empty when the key is absent
    pub fn set_members(&self, key: &str) -> StoreResult<Vec<String>> {
        let entries = self.lock()?;
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Set(set)) => {
                let mut members: Vec<String> = set.iter().cloned().collect();
                members.sort();
                Ok(members)
            }
            Some(Entry::List(_)) => Err(wrong_type(key)),
        }
    }

    /// Number of keys held
    pub fn key_count(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries.lock().map_err(|_| StoreError::Unavailable {
            message: "memory store lock poisoned".to_string(),
        })
    }

    fn apply(
        entries: &mut HashMap<String, Entry>,
        command: &StoreCommand,
    ) -> StoreResult<StoreReply> {
        let reply = match command {
            StoreCommand::ListPushHead { values, .. } | StoreCommand::ListPushTail { values, .. }
                if values.is_empty() =>
            {
                return Err(StoreError::WrongArity {
                    command: command.name(),
                });
            }
            StoreCommand::ListPushHead { key, values } => {
                let list = list_for_push(entries, key)?;
                for value in values {
                    list.push_front(value.clone());
                }
                StoreReply::Count(list.len() as u64)
            }
            StoreCommand::ListPushTail { key, values } => {
                let list = list_for_push(entries, key)?;
                list.extend(values.iter().cloned());
                StoreReply::Count(list.len() as u64)
            }
            StoreCommand::ListPopHead { key } => {
                StoreReply::Element(pop(entries, key, VecDeque::pop_front)?)
            }
            StoreCommand::ListPopTail { key } => {
                StoreReply::Element(pop(entries, key, VecDeque::pop_back)?)
            }
            StoreCommand::ListLength { key } => StoreReply::Count(list_length(entries, key)?),
            StoreCommand::ListRange { key, from, to } => {
                let elements = match entries.get(key) {
                    None => Vec::new(),
                    Some(Entry::List(list)) => match clamp_range(list.len(), *from, *to) {
                        Some((start, end)) => list.range(start..=end).cloned().collect(),
                        None => Vec::new(),
                    },
                    Some(Entry::Set(_)) => return Err(wrong_type(key)),
                };
                StoreReply::Elements(elements)
            }
            StoreCommand::SetAdd { key, value } => {
                let entry = entries
                    .entry(key.clone())
                    .or_insert_with(|| Entry::Set(HashSet::new()));
                match entry {
                    Entry::Set(set) => StoreReply::Count(u64::from(set.insert(value.clone()))),
                    Entry::List(_) => return Err(wrong_type(key)),
                }
            }
            StoreCommand::DeleteKeys { keys } => {
                let removed = keys
                    .iter()
                    .filter(|key| entries.remove(key.as_str()).is_some())
                    .count();
                StoreReply::Count(removed as u64)
            }
        };
        Ok(reply)
    }

    fn run(&self, command: StoreCommand) -> StoreResult<StoreReply> {
        let mut entries = self.lock()?;
        Self::apply(&mut entries, &command)
    }
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
    }
}

fn list_length(entries: &HashMap<String, Entry>, key: &str) -> StoreResult<u64> {
    match entries.get(key) {
        None => Ok(0),
        Some(Entry::List(list)) => Ok(list.len() as u64),
        Some(Entry::Set(_)) => Err(wrong_type(key)),
    }
}

fn list_for_push<'a>(
    entries: &'a mut HashMap<String, Entry>,
    key: &str,
) -> StoreResult<&'a mut VecDeque<String>> {
    match entries
        .entry(key.to_string())
        .or_insert_with(|| Entry::List(VecDeque::new()))
    {
        Entry::List(list) => Ok(list),
        Entry::Set(_) => Err(wrong_type(key)),
    }
}

fn pop(
    entries: &mut HashMap<String, Entry>,
    key: &str,
    take: fn(&mut VecDeque<String>) -> Option<String>,
) -> StoreResult<Option<String>> {
    let (element, now_empty) = match entries.get_mut(key) {
        None => return Ok(None),
        Some(Entry::List(list)) => {
            let element = take(list);
            (element, list.is_empty())
        }
        Some(Entry::Set(_)) => return Err(wrong_type(key)),
    };
    if now_empty {
        entries.remove(key);
    }
    Ok(element)
}

/// Resolve an inclusive Redis-style range against a list of `len` items
fn clamp_range(len: usize, from: i64, to: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if from < 0 { (len + from).max(0) } else { from };
    let end = if to < 0 { len + to } else { to.min(len - 1) };
    if start >= len || end < 0 || start > end {
        return None;
    }
    Some((start as usize, end as usize))
}

impl Store for MemoryStore {
    fn list_push_head(&self, key: &str, values: &[String]) -> StoreResult<u64> {
        self.run(StoreCommand::ListPushHead {
            key: key.to_string(),
            values: values.to_vec(),
        })?
        .into_count("LPUSH")
    }

    fn list_push_tail(&self, key: &str, values: &[String]) -> StoreResult<u64> {
        self.run(StoreCommand::ListPushTail {
            key: key.to_string(),
            values: values.to_vec(),
        })?
        .into_count("RPUSH")
    }

    fn list_pop_head(&self, key: &str) -> StoreResult<Option<String>> {
        self.run(StoreCommand::ListPopHead {
            key: key.to_string(),
        })?
        .into_element("LPOP")
    }

    fn list_pop_tail(&self, key: &str) -> StoreResult<Option<String>> {
        self.run(StoreCommand::ListPopTail {
            key: key.to_string(),
        })?
        .into_element("RPOP")
    }

    fn list_length(&self, key: &str) -> StoreResult<u64> {
        self.run(StoreCommand::ListLength {
            key: key.to_string(),
        })?
        .into_count("LLEN")
    }

    fn list_range(&self, key: &str, from: i64, to: i64) -> StoreResult<Vec<String>> {
        self.run(StoreCommand::ListRange {
            key: key.to_string(),
            from,
            to,
        })?
        .into_elements("LRANGE")
    }

    fn set_add(&self, key: &str, value: &str) -> StoreResult<u64> {
        self.run(StoreCommand::SetAdd {
            key: key.to_string(),
            value: value.to_string(),
        })?
        .into_count("SADD")
    }

    fn delete_keys(&self, keys: &[String]) -> StoreResult<u64> {
        self.run(StoreCommand::DeleteKeys {
            keys: keys.to_vec(),
        })?
        .into_count("DEL")
    }

    fn pipeline(&self, commands: &[StoreCommand]) -> StoreResult<Vec<StoreReply>> {
        let mut entries = self.lock()?;
        commands
            .iter()
            .map(|command| Self::apply(&mut entries, command))
            .collect()
    }
}
