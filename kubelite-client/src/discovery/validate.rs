use std::future::Future;

use kubelite_core::{
    discovery::{self as paths, ComponentStatus, ComponentStatusList},
    ObjectList,
};

use crate::{Client, Clientset, Error, Result};

/// Health check of the control-plane components
pub trait ComponentValidator {
    /// Statuses reported by `/validate`, in server order
    ///
    /// The server answers with a bare array; it is wrapped into a list here.
    fn validate_components(&self) -> impl Future<Output = Result<ComponentStatusList>> + Send;
}

impl ComponentValidator for Client {
    async fn validate_components(&self) -> Result<ComponentStatusList> {
        let req = paths::validate_request().get_path().map_err(Error::BuildRequest)?;
        let statuses: Vec<ComponentStatus> = self.request(req).await?;
        Ok(ObjectList::from_items(statuses))
    }
}

impl ComponentValidator for Clientset {
    async fn validate_components(&self) -> Result<ComponentStatusList> {
        self.client().validate_components().await
    }
}
