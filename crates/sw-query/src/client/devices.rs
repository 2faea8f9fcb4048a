use tracing::instrument;

use solarweb_client::Result;

use crate::device::DeviceList;

impl super::SolarWebClient {
    /// List the devices of a PV system.
    ///
    /// `None` uses the configured system.
    #[instrument(skip(self))]
    pub async fn devices(&self, pv_system_id: Option<&str>) -> Result<DeviceList> {
        let path = self.system_path(pv_system_id, "/devices")?;
        self.send(self.get(&path)).await
    }
}
