//! General robot control: identity, naming, reset, disconnect.

use rootbot_protocol::{
    string_from_padded, BoardVersion, Command, VersionInfo, DEVICE_GENERAL, MAX_NAME_LEN,
};

use crate::devices::EventStream;
use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the general device (id 0).
pub struct General<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> General<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        General { link }
    }

    /// Query the software/hardware versions of one board.
    pub async fn versions(&self, board: BoardVersion) -> Result<VersionInfo, ClientError> {
        let payload = self.link.request(&Command::GetVersions { board }).await?;
        Ok(VersionInfo::from_payload(&payload))
    }

    /// Set the BLE advertising name. Fire-and-forget; the robot does not
    /// acknowledge this command.
    ///
    /// The name must fit in the 16-byte payload; longer names are rejected
    /// here rather than silently truncated on the wire.
    pub async fn set_name(&self, name: &str) -> Result<(), ClientError> {
        if name.len() > MAX_NAME_LEN {
            return Err(ClientError::Validation(format!(
                "name is {} bytes, the limit is {}",
                name.len(),
                MAX_NAME_LEN
            )));
        }
        self.link.send(&Command::SetName { name: name.to_owned() }).await?;
        Ok(())
    }

    /// Read the current BLE advertising name.
    pub async fn name(&self) -> Result<String, ClientError> {
        let payload = self.link.request(&Command::GetName).await?;
        Ok(string_from_padded(&payload))
    }

    /// Read the product serial number.
    pub async fn serial_number(&self) -> Result<String, ClientError> {
        let payload = self.link.request(&Command::GetSerialNumber).await?;
        Ok(string_from_padded(&payload))
    }

    /// Immediately stop the robot and cancel all pending actions.
    pub async fn stop_and_reset(&self) -> Result<(), ClientError> {
        self.link.send(&Command::StopAndReset).await?;
        Ok(())
    }

    /// Ask the robot to drop the BLE connection from its side.
    pub async fn disconnect(&self) -> Result<(), ClientError> {
        self.link.send(&Command::Disconnect).await?;
        Ok(())
    }

    /// Enable event notifications for the listed devices.
    ///
    /// All events are enabled by default; this only matters after a
    /// [`disable_events`](Self::disable_events).
    pub async fn enable_events(&self, devices: &[u8]) -> Result<(), ClientError> {
        self.link
            .send(&Command::EnableEvents { devices: devices.to_vec() })
            .await?;
        Ok(())
    }

    /// Disable event notifications for the listed devices.
    pub async fn disable_events(&self, devices: &[u8]) -> Result<(), ClientError> {
        self.link
            .send(&Command::DisableEvents { devices: devices.to_vec() })
            .await?;
        Ok(())
    }

    /// Subscribe to general device events (currently only Stop Project).
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_GENERAL))
    }
}
