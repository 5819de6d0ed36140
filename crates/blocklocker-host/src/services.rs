//! The bundle of collaborators an engine is built from.

use std::rc::Rc;

use crate::traits::{
    ChestSettings, Clock, ProfileFactory, ProtectionFinder, ProtectionUpdater, Scheduler,
    SignParser, SignSelector, Translator, World,
};

/// Every collaborator the engine calls, shared by reference count.
#[derive(Clone)]
pub struct Services {
    pub world: Rc<dyn World>,
    pub finder: Rc<dyn ProtectionFinder>,
    pub signs: Rc<dyn SignParser>,
    pub profiles: Rc<dyn ProfileFactory>,
    pub updater: Rc<dyn ProtectionUpdater>,
    pub settings: Rc<dyn ChestSettings>,
    pub translator: Rc<dyn Translator>,
    pub selector: Rc<dyn SignSelector>,
    pub scheduler: Rc<dyn Scheduler>,
    pub clock: Rc<dyn Clock>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
