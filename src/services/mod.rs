//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod fees;
pub mod members;
pub mod notifier;
pub mod stats;

use std::sync::Arc;

use crate::{config::CirculationConfig, factory::{IdGenerator, ItemFactory}, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub circulation: circulation::CirculationService,
    pub stats: stats::StatsService,
    pub notifier: notifier::EventNotifier,
}

impl Services {
    /// Create all services over a shared repository. The id generator is
    /// injected so drivers and tests control id determinism.
    pub fn new(
        repository: Repository,
        circulation_config: CirculationConfig,
        notifier: notifier::EventNotifier,
        ids: Arc<IdGenerator>,
    ) -> Self {
        let factory = Arc::new(ItemFactory::new(ids.clone()));
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), factory),
            members: members::MembersService::new(repository.clone(), ids),
            circulation: circulation::CirculationService::new(
                repository.clone(),
                notifier.clone(),
                circulation_config,
            ),
            stats: stats::StatsService::new(repository),
            notifier,
        }
    }
}
