use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource families the resolver knows how to look up by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Server,
    Organization,
    #[value(name = "os-image")]
    OperatingSystemImage,
    #[value(name = "scu-image")]
    ConfigUtilityImage,
    #[value(name = "profile")]
    ServerProfile,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Server,
        ResourceKind::Organization,
        ResourceKind::OperatingSystemImage,
        ResourceKind::ConfigUtilityImage,
        ResourceKind::ServerProfile,
    ];

    /// Collection path relative to the API root (`/api/v1`).
    pub fn collection_path(self) -> &'static str {
        match self {
            ResourceKind::Server => "/compute/PhysicalSummaries",
            ResourceKind::Organization => "/organization/Organizations",
            ResourceKind::OperatingSystemImage => "/softwarerepository/OperatingSystemFiles",
            ResourceKind::ConfigUtilityImage => {
                "/firmware/ServerConfigurationUtilityDistributables"
            }
            ResourceKind::ServerProfile => "/server/Profiles",
        }
    }

    /// Object type used when a listing does not report a more specific one.
    ///
    /// Servers are listed through a summary view, so their referenceable type
    /// comes from the listing's `SourceObjectType` instead.
    pub fn object_type(self) -> &'static str {
        match self {
            ResourceKind::Server => "compute.PhysicalSummary",
            ResourceKind::Organization => "organization.Organization",
            ResourceKind::OperatingSystemImage => "softwarerepository.OperatingSystemFile",
            ResourceKind::ConfigUtilityImage => {
                "firmware.ServerConfigurationUtilityDistributable"
            }
            ResourceKind::ServerProfile => "server.Profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Server => "server",
            ResourceKind::Organization => "organization",
            ResourceKind::OperatingSystemImage => "OS image",
            ResourceKind::ConfigUtilityImage => "SCU image",
            ResourceKind::ServerProfile => "server profile",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
