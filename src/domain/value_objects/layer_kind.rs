//! LayerKind value object - the architectural slot a class spec generates into
//!
//! Every spec item names exactly one `LayerKind`. The kind decides:
//! - the tier (domain, application, infrastructure, presentation) and its rank
//! - the directory the generated source lands in
//! - the test category (if the kind gets a generated test at all)
//! - which other kinds it may reference

use std::fmt;
use std::str::FromStr;

/// The four architectural tiers, ordered by rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Domain,
    Application,
    Infrastructure,
    Presentation,
}

impl Tier {
    /// Numeric rank (domain=0 .. presentation=3)
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Domain => 0,
            Tier::Application => 1,
            Tier::Infrastructure => 2,
            Tier::Presentation => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Domain => "domain",
            Tier::Application => "application",
            Tier::Infrastructure => "infrastructure",
            Tier::Presentation => "presentation",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category a generated test belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestCategory {
    Unit,
    Integration,
    E2e,
}

impl TestCategory {
    /// Directory name under the test root
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::Unit => "unit",
            TestCategory::Integration => "integration",
            TestCategory::E2e => "e2e",
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layer a class spec belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    DomainEntity,
    DomainService,
    ApplicationInterface,
    ApplicationUseCase,
    InfrastructureModel,
    InfrastructureRepository,
    InfrastructureAdapter,
    InfrastructurePipelineStep,
    PresentationSchema,
    PresentationDependency,
    PresentationRouter,
}

impl LayerKind {
    /// Every layer kind, in rank order
    pub const ALL: [LayerKind; 11] = [
        LayerKind::DomainEntity,
        LayerKind::DomainService,
        LayerKind::ApplicationInterface,
        LayerKind::ApplicationUseCase,
        LayerKind::InfrastructureModel,
        LayerKind::InfrastructureRepository,
        LayerKind::InfrastructureAdapter,
        LayerKind::InfrastructurePipelineStep,
        LayerKind::PresentationSchema,
        LayerKind::PresentationDependency,
        LayerKind::PresentationRouter,
    ];

    /// Canonical dotted tag (`domain.entity`)
    pub fn tag(&self) -> &'static str {
        match self {
            LayerKind::DomainEntity => "domain.entity",
            LayerKind::DomainService => "domain.service",
            LayerKind::ApplicationInterface => "application.interface",
            LayerKind::ApplicationUseCase => "application.use_case",
            LayerKind::InfrastructureModel => "infrastructure.model",
            LayerKind::InfrastructureRepository => "infrastructure.repository",
            LayerKind::InfrastructureAdapter => "infrastructure.adapter",
            LayerKind::InfrastructurePipelineStep => "infrastructure.pipeline_step",
            LayerKind::PresentationSchema => "presentation.schema",
            LayerKind::PresentationDependency => "presentation.dependency",
            LayerKind::PresentationRouter => "presentation.router",
        }
    }

    /// Parse a layer tag. Accepts the dotted form and the slash form
    /// used by older spec files (`domain/entity`).
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = tag.trim().replace('/', ".");
        Self::ALL.into_iter().find(|kind| kind.tag() == normalized)
    }

    pub fn tier(&self) -> Tier {
        match self {
            LayerKind::DomainEntity | LayerKind::DomainService => Tier::Domain,
            LayerKind::ApplicationInterface | LayerKind::ApplicationUseCase => Tier::Application,
            LayerKind::InfrastructureModel
            | LayerKind::InfrastructureRepository
            | LayerKind::InfrastructureAdapter
            | LayerKind::InfrastructurePipelineStep => Tier::Infrastructure,
            LayerKind::PresentationSchema
            | LayerKind::PresentationDependency
            | LayerKind::PresentationRouter => Tier::Presentation,
        }
    }

    pub fn rank(&self) -> u8 {
        self.tier().rank()
    }

    /// Source directory for this kind, relative to the source root
    pub fn root(&self) -> &'static str {
        match self {
            LayerKind::DomainEntity => "domain/entities",
            LayerKind::DomainService => "domain/services",
            LayerKind::ApplicationInterface => "application/interfaces",
            LayerKind::ApplicationUseCase => "application/use_cases",
            LayerKind::InfrastructureModel => "infrastructure/models",
            LayerKind::InfrastructureRepository => "infrastructure/repositories",
            LayerKind::InfrastructureAdapter => "infrastructure/adapters",
            LayerKind::InfrastructurePipelineStep => "infrastructure/pipeline_steps",
            LayerKind::PresentationSchema => "presentation/api/v1/schemas",
            LayerKind::PresentationDependency => "presentation/api/v1/dependencies",
            LayerKind::PresentationRouter => "presentation/api/v1/routers",
        }
    }

    /// Test category, or `None` when the kind gets no generated test
    pub fn test_category(&self) -> Option<TestCategory> {
        match self {
            LayerKind::DomainEntity | LayerKind::DomainService | LayerKind::ApplicationUseCase => {
                Some(TestCategory::Unit)
            }
            LayerKind::InfrastructureRepository
            | LayerKind::InfrastructureAdapter
            | LayerKind::InfrastructurePipelineStep => Some(TestCategory::Integration),
            LayerKind::PresentationRouter => Some(TestCategory::E2e),
            LayerKind::ApplicationInterface
            | LayerKind::InfrastructureModel
            | LayerKind::PresentationSchema
            | LayerKind::PresentationDependency => None,
        }
    }

    /// Interface-like kinds get an `I`-prefixed identifier
    pub fn is_interface_like(&self) -> bool {
        matches!(self, LayerKind::ApplicationInterface)
    }

    /// Whether an item of this kind may reference an item of `target`.
    pub fn allows_reference_to(&self, target: LayerKind) -> bool {
        let target_is_domain = target.tier() == Tier::Domain;
        match self.tier() {
            Tier::Domain => target_is_domain,
            Tier::Application => match self {
                LayerKind::ApplicationUseCase => {
                    target_is_domain || target == LayerKind::ApplicationInterface
                }
                _ => target_is_domain,
            },
            Tier::Infrastructure => {
                target_is_domain || target == LayerKind::ApplicationInterface
            }
            Tier::Presentation => matches!(
                target,
                LayerKind::ApplicationUseCase
                    | LayerKind::ApplicationInterface
                    | LayerKind::PresentationSchema
            ),
        }
    }

    /// Kinds this kind may reference, in rank order
    pub fn allowed_targets(&self) -> Vec<LayerKind> {
        Self::ALL
            .into_iter()
            .filter(|target| self.allows_reference_to(*target))
            .collect()
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|k| k.tag()).collect();
            format!("unknown layer '{}' (expected one of: {})", s, known.join(", "))
        })
    }
}
