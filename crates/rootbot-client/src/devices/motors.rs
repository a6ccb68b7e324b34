//! Drive motor control.

use rootbot_protocol::{Command, DEVICE_MOTORS};

use crate::devices::EventStream;
use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the drive motors (device id 1).
///
/// Speeds are in mm/s and clamped to the robot's [-100, 100] range during
/// encoding. `drive_distance` and `rotate_angle` block until the robot
/// reports the motion finished; for motions longer than the configured
/// response deadline, raise the deadline in the connection config.
pub struct Motors<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> Motors<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        Motors { link }
    }

    /// Set both motor speeds.
    pub async fn set_speed(&self, left: i32, right: i32) -> Result<(), ClientError> {
        self.link
            .send(&Command::SetLeftRightSpeed { left, right })
            .await?;
        Ok(())
    }

    /// Set the left motor speed only.
    pub async fn set_left_speed(&self, speed: i32) -> Result<(), ClientError> {
        self.link.send(&Command::SetLeftSpeed { speed }).await?;
        Ok(())
    }

    /// Set the right motor speed only.
    pub async fn set_right_speed(&self, speed: i32) -> Result<(), ClientError> {
        self.link.send(&Command::SetRightSpeed { speed }).await?;
        Ok(())
    }

    /// Stop both motors.
    pub async fn stop(&self) -> Result<(), ClientError> {
        self.set_speed(0, 0).await
    }

    /// Drive a straight line and wait for the robot to finish.
    ///
    /// Negative distances drive backwards.
    pub async fn drive_distance(&self, distance_mm: i32) -> Result<(), ClientError> {
        self.link
            .request(&Command::DriveDistance { distance_mm })
            .await?;
        Ok(())
    }

    /// Rotate in place and wait for the robot to finish.
    ///
    /// The angle is in decidegrees; positive rotates clockwise.
    pub async fn rotate_angle(&self, decidegrees: i32) -> Result<(), ClientError> {
        self.link
            .request(&Command::RotateAngle { decidegrees })
            .await?;
        Ok(())
    }

    /// Subscribe to motor stall events.
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_MOTORS))
    }
}
