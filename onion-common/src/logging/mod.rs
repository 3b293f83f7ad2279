// Logging utilities for the onion node crates
//
// This module provides a small structured logging layer over the `log` facade:
// - Component-based prefixes
// - Node ID tracking through logger inheritance
// - fmt::Arguments variants that avoid allocating the message

use log::{debug, info, warn};
use std::fmt::{self, Arguments, Display, Formatter};

/// Node id used before the node identity has been derived.
pub const PENDING_NODE_ID: &str = "uninitialized";

/// Predefined components for logging categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Init,
    Keys,
    Onion,
    Config,
    Custom(&'static str),
}

impl Component {
    /// Get the string representation of the component
    pub fn as_str(&self) -> &str {
        match self {
            Component::Init => "Init",
            Component::Keys => "Keys",
            Component::Onion => "Onion",
            Component::Config => "Config",
            Component::Custom(name) => name,
        }
    }
}

// Display helper so prefixes are written straight into the log record
struct ComponentPrefixDisplay {
    parent: Option<Component>,
    component: Component,
}

impl Display for ComponentPrefixDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) if parent != Component::Init => {
                write!(f, "{}.{}", parent.as_str(), self.component.as_str())
            }
            _ => write!(f, "{}", self.component.as_str()),
        }
    }
}

/// A helper for creating component-specific loggers with node ID tracking
#[derive(Clone, Debug)]
pub struct Logger {
    component: Component,
    node_id: String,
    parent_component: Option<Component>,
}

impl Logger {
    /// Create a new root logger for a specific component and node ID
    pub fn new_root(component: Component, node_id: &str) -> Self {
        Self {
            component,
            node_id: node_id.to_string(),
            parent_component: None,
        }
    }

    /// Root logger for a node whose identity does not exist yet
    pub fn pending(component: Component) -> Self {
        Self::new_root(component, PENDING_NODE_ID)
    }

    /// Create a child logger with the same node ID but different component
    pub fn with_component(&self, component: Component) -> Self {
        Self {
            component,
            node_id: self.node_id.clone(),
            parent_component: Some(self.component),
        }
    }

    /// Rebind this logger to a node ID, typically once the peer identity is known
    pub fn with_node_id(&self, node_id: impl Into<String>) -> Self {
        Self {
            component: self.component,
            node_id: node_id.into(),
            parent_component: self.parent_component,
        }
    }

    /// Get a reference to the node ID
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Component prefix, including parent if available
    pub fn prefix(&self) -> String {
        self.prefix_display().to_string()
    }

    fn prefix_display(&self) -> ComponentPrefixDisplay {
        ComponentPrefixDisplay {
            parent: self.parent_component,
            component: self.component,
        }
    }

    // The root Init logger omits its component to avoid redundancy
    fn is_root_init(&self) -> bool {
        self.component == Component::Init && self.parent_component.is_none()
    }

    /// Log a debug message using fmt::Arguments
    pub fn debug_args(&self, args: Arguments) {
        if log::log_enabled!(log::Level::Debug) {
            if self.is_root_init() {
                debug!("[{}] {}", self.node_id, args);
            } else {
                debug!("[{}][{}] {}", self.node_id, self.prefix_display(), args);
            }
        }
    }

    /// Log an info message using fmt::Arguments
    pub fn info_args(&self, args: Arguments) {
        if log::log_enabled!(log::Level::Info) {
            if self.is_root_init() {
                info!("[{}] {}", self.node_id, args);
            } else {
                info!("[{}][{}] {}", self.node_id, self.prefix_display(), args);
            }
        }
    }

    /// Log a warning using fmt::Arguments
    pub fn warn_args(&self, args: Arguments) {
        if log::log_enabled!(log::Level::Warn) {
            if self.is_root_init() {
                warn!("[{}] {}", self.node_id, args);
            } else {
                warn!("[{}][{}] {}", self.node_id, self.prefix_display(), args);
            }
        }
    }
}
