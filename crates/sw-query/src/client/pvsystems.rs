use tracing::instrument;

use solarweb_client::Result;

use crate::pvsystem::{PvSystem, PvSystemList};

impl super::SolarWebClient {
    /// List the PV systems visible to these credentials.
    #[instrument(skip(self))]
    pub async fn pv_systems(&self) -> Result<PvSystemList> {
        self.send(self.get("/pvsystems")).await
    }

    /// Get metadata for one PV system.
    ///
    /// `None` uses the configured system.
    #[instrument(skip(self))]
    pub async fn pv_system(&self, pv_system_id: Option<&str>) -> Result<PvSystem> {
        let path = self.system_path(pv_system_id, "")?;
        self.send(self.get(&path)).await
    }
}
