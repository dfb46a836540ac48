//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vendor identifier - newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(i32);

impl VendorId {
    /// Create a new VendorId from a raw row id.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for VendorId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Purchase order identifier - newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(i32);

impl PurchaseOrderId {
    /// Create a new PurchaseOrderId from a raw row id.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PurchaseOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PurchaseOrderId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}
