//! Registry event names
//!
//! Every registry event is scoped to one asset id and rendered as
//! `"<event>:<id>"`, e.g. `load:C1`.

use crate::{AssetError, AssetId};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssetEvent {
    Add,
    Load,
    Remove,
    Error,
}

impl AssetEvent {
    pub fn name(self) -> &'static str {
        match self {
            AssetEvent::Add => "add",
            AssetEvent::Load => "load",
            AssetEvent::Remove => "remove",
            AssetEvent::Error => "error",
        }
    }
}

impl FromStr for AssetEvent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(AssetEvent::Add),
            "load" => Ok(AssetEvent::Load),
            "remove" => Ok(AssetEvent::Remove),
            "error" => Ok(AssetEvent::Error),
            _ => Err(()),
        }
    }
}

/// An event name bound to a single asset id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub event: AssetEvent,
    pub id: AssetId,
}

impl EventKey {
    pub fn new(event: AssetEvent, id: AssetId) -> Self {
        Self { event, id }
    }

    pub fn add(id: &AssetId) -> Self {
        Self::new(AssetEvent::Add, id.clone())
    }

    pub fn load(id: &AssetId) -> Self {
        Self::new(AssetEvent::Load, id.clone())
    }

    pub fn remove(id: &AssetId) -> Self {
        Self::new(AssetEvent::Remove, id.clone())
    }

    pub fn error(id: &AssetId) -> Self {
        Self::new(AssetEvent::Error, id.clone())
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.event.name(), self.id)
    }
}

impl FromStr for EventKey {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AssetError::InvalidEventKey { key: s.to_string() };

        let (event, id) = s.split_once(':').ok_or_else(invalid)?;
        let event = event.parse::<AssetEvent>().map_err(|_| invalid())?;
        if id.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(event, AssetId::from(id)))
    }
}
