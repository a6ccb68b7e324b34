//! Front bumper events.

use rootbot_protocol::DEVICE_BUMPERS;

use crate::devices::EventStream;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the front bumpers (device id 12). Event-only.
pub struct Bumpers<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> Bumpers<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        Bumpers { link }
    }

    /// Subscribe to bumper press/release events.
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_BUMPERS))
    }
}
