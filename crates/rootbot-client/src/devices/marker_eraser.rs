//! Marker/eraser actuator control.

use rootbot_protocol::{Command, MarkerEraserPosition};

use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the marker/eraser actuator (device id 2).
pub struct MarkerEraser<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> MarkerEraser<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        MarkerEraser { link }
    }

    /// Move the actuator and wait until it reaches the position.
    pub async fn set_position(&self, position: MarkerEraserPosition) -> Result<(), ClientError> {
        self.link
            .request(&Command::SetMarkerEraser { position })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ready_link, respond_to_next};
    use rootbot_protocol::{CMD_MARKER_ERASER_SET_POSITION, DEVICE_MARKER_ERASER, PAYLOAD_SIZE};

    #[tokio::test(start_paused = true)]
    async fn test_set_position_waits_for_completion() {
        let (link, mock) = ready_link();
        let marker = MarkerEraser::new(link);
        let mut sent = mock.take_sent_receiver();

        let responder = tokio::spawn(async move {
            respond_to_next(&mut sent, &mock, 0, [0u8; PAYLOAD_SIZE]).await
        });

        marker
            .set_position(MarkerEraserPosition::MarkerDownEraserUp)
            .await
            .unwrap();

        let wire = responder.await.unwrap();
        assert_eq!(wire[0], DEVICE_MARKER_ERASER);
        assert_eq!(wire[1], CMD_MARKER_ERASER_SET_POSITION);
        assert_eq!(wire[3], 1);
    }
}
