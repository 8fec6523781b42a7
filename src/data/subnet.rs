//! Subnet index: which observed addresses share a subnet.

use std::collections::HashMap;

use probewatch_types::{Address, Subnet};

use super::RecordStore;
use crate::ProbeError;

/// Mapping from subnet to member addresses, derived once from a store.
#[derive(Debug, Clone, Default)]
pub struct SubnetIndex {
    order: Vec<Subnet>,
    members: HashMap<Subnet, Vec<Address>>,
}

impl SubnetIndex {
    /// Group every address in `store` by its masked subnet.
    ///
    /// Subnets and their members both follow the store's first-seen order.
    pub fn from_store(store: &RecordStore) -> Self {
        Self::from_addresses(store.addresses().copied())
    }

    pub fn from_addresses<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let mut order = Vec::new();
        let mut members: HashMap<Subnet, Vec<Address>> = HashMap::new();

        for address in addresses {
            let subnet = address.subnet();
            members
                .entry(subnet)
                .or_insert_with(|| {
                    order.push(subnet);
                    Vec::new()
                })
                .push(address);
        }

        Self { order, members }
    }

    /// Subnets in first-seen order.
    pub fn subnets(&self) -> impl Iterator<Item = &Subnet> {
        self.order.iter()
    }

    /// Members of `subnet`; never empty for a known subnet.
    pub fn members_of(&self, subnet: &Subnet) -> Result<&[Address], ProbeError> {
        self.members
            .get(subnet)
            .map(Vec::as_slice)
            .ok_or(ProbeError::SubnetNotFound(*subnet))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
