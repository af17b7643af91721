use crate::KeySource;
use core_events::KeyEvent;
use std::collections::VecDeque;

/// Replays a fixed key sequence, then reports end of input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeySource {
    keys: VecDeque<KeyEvent>,
    delivered: usize,
}

impl ScriptedKeySource {
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<KeyEvent>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            delivered: 0,
        }
    }

    pub fn push<K: Into<KeyEvent>>(&mut self, key: K) {
        self.keys.push_back(key.into());
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl KeySource for ScriptedKeySource {
    fn next_key(&mut self) -> anyhow::Result<Option<KeyEvent>> {
        let next = self.keys.pop_front();
        if next.is_some() {
            self.delivered += 1;
        }
        Ok(next)
    }
}
