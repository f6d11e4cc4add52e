use std::sync::Arc;

use crate::config::Config;
use crate::spaces::{SpacesSigner, UploadSigner};

pub struct AppState {
    pub signer: Box<dyn UploadSigner>,
}

impl AppState {
    pub fn new(config: &Config) -> Arc<Self> {
        Self::with_signer(SpacesSigner::new(&config.spaces))
    }

    pub fn with_signer(signer: impl UploadSigner + 'static) -> Arc<Self> {
        Arc::new(Self {
            signer: Box::new(signer),
        })
    }
}
