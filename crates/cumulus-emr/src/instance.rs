//! Instance group topology types.

use serde::{Deserialize, Serialize};

/// Role an instance group plays in the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceRole {
    /// The single coordinating node. Every cluster has exactly one.
    Master,
    /// Worker nodes, present only when the requested size exceeds one.
    Core,
}

/// Pricing mode for an instance group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Market {
    /// Fixed-price, non-preemptible capacity.
    OnDemand,
    /// Preemptible capacity; requires a bid price.
    Spot,
}

/// One homogeneous group of cluster instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceGroup {
    /// Display name, e.g. "Master" or "Worker Instances".
    pub name: String,
    /// Pricing mode.
    pub market: Market,
    /// Role within the cluster.
    pub instance_role: InstanceRole,
    /// Provider instance type, e.g. "c3.4xlarge".
    pub instance_type: String,
    /// Number of instances in this group.
    pub instance_count: u32,
    /// Bid price in the provider's currency units. Present iff `market` is spot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<String>,
}

impl InstanceGroup {
    /// Create an on-demand instance group.
    pub fn on_demand(
        name: impl Into<String>,
        role: InstanceRole,
        instance_type: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            name: name.into(),
            market: Market::OnDemand,
            instance_role: role,
            instance_type: instance_type.into(),
            instance_count: count,
            bid_price: None,
        }
    }

    /// Create a spot instance group with the given bid price.
    pub fn spot(
        name: impl Into<String>,
        role: InstanceRole,
        instance_type: impl Into<String>,
        count: u32,
        bid_price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            market: Market::Spot,
            instance_role: role,
            instance_type: instance_type.into(),
            instance_count: count,
            bid_price: Some(bid_price.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_demand_omits_bid_price() {
        let group = InstanceGroup::on_demand("Master", InstanceRole::Master, "c3.4xlarge", 1);
        let value = serde_json::to_value(&group).unwrap();

        assert_eq!(value["Market"], "ON_DEMAND");
        assert_eq!(value["InstanceRole"], "MASTER");
        assert_eq!(value["InstanceCount"], 1);
        assert!(value.get("BidPrice").is_none());
    }

    #[test]
    fn test_spot_carries_bid_price() {
        let group =
            InstanceGroup::spot("Worker Instances", InstanceRole::Core, "c3.4xlarge", 5, "0.84");
        let value = serde_json::to_value(&group).unwrap();

        assert_eq!(value["Market"], "SPOT");
        assert_eq!(value["InstanceRole"], "CORE");
        assert_eq!(value["BidPrice"], "0.84");
    }

    #[test]
    fn test_wire_names_are_pascal_case() {
        let group = InstanceGroup::on_demand("Master", InstanceRole::Master, "c3.4xlarge", 1);
        let value = serde_json::to_value(&group).unwrap();
        let object = value.as_object().unwrap();

        for key in ["Name", "Market", "InstanceRole", "InstanceType", "InstanceCount"] {
            assert!(object.contains_key(key), "missing wire field {}", key);
        }
    }
}
