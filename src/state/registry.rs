use crate::config::Config;
use crate::models::types::UserName;
use crate::services::ProfileService;
use crate::store::ProfileStore;
use crate::store::repo::{ProfileRepo, ProfileRepository};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct Services {
    pub profile: Arc<ProfileService>,
}

pub struct Registry {
    pub store: Arc<ProfileStore>,
    pub services: Arc<Services>,
    pub config: Arc<Config>,
    pub online: RwLock<BTreeSet<UserName>>,
}

impl Registry {
    /// Registry backed by one JSON file per profile under `config.profiles_dir`.
    pub fn new(config: Arc<Config>) -> Self {
        let repo = Arc::new(ProfileRepository::new(config.profiles_dir.clone()));
        Self::with_repo(config, repo)
    }

    pub fn with_repo(config: Arc<Config>, repo: Arc<dyn ProfileRepo>) -> Self {
        let store = Arc::new(ProfileStore::new(repo, config.corrupt_records));
        let services = Arc::new(Services {
            profile: Arc::new(ProfileService::new(store.clone())),
        });

        Self {
            store,
            services,
            config,
            online: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn set_online(&self, user: &UserName, online: bool) {
        let mut g = self.online.write();
        if online {
            g.insert(user.clone());
        } else {
            g.remove(user);
        }
    }

    pub fn who(&self) -> Vec<String> {
        self.online.read().iter().map(|u| u.to_string()).collect()
    }
}
