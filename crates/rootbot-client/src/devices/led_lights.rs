//! LED cross animation control.

use rootbot_protocol::{Command, LedAnimation};

use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the LED lights (device id 3).
pub struct LedLights<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> LedLights<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        LedLights { link }
    }

    /// Set the animation mode and color of the LED cross.
    pub async fn set_animation(
        &self,
        mode: LedAnimation,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), ClientError> {
        self.link
            .send(&Command::SetLedAnimation { mode, red, green, blue })
            .await?;
        Ok(())
    }

    /// Turn the LED cross off.
    pub async fn off(&self) -> Result<(), ClientError> {
        self.set_animation(LedAnimation::Off, 0, 0, 0).await
    }
}
