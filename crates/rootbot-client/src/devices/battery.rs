//! Battery monitor.

use rootbot_protocol::{decode_battery_level, BatteryLevel, Command, DEVICE_BATTERY};

use crate::devices::EventStream;
use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the battery monitor (device id 14).
pub struct Battery<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> Battery<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        Battery { link }
    }

    /// Read the current battery level.
    pub async fn level(&self) -> Result<BatteryLevel, ClientError> {
        let payload = self.link.request(&Command::GetBatteryLevel).await?;
        Ok(decode_battery_level(&payload))
    }

    /// Subscribe to unsolicited battery level events (sent on a >10% drop).
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_BATTERY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{push_event, ready_link, respond_to_next};
    use rootbot_protocol::{TelemetryEvent, CMD_BATTERY_GET_LEVEL, EVT_BATTERY_LEVEL, PAYLOAD_SIZE};

    #[tokio::test(start_paused = true)]
    async fn test_level_request_and_decode() {
        let (link, mock) = ready_link();
        let battery = Battery::new(link);
        let mut sent = mock.take_sent_receiver();

        let responder = tokio::spawn(async move {
            let mut payload = [0u8; PAYLOAD_SIZE];
            payload[..7].copy_from_slice(&[0, 0, 0, 9, 0x0F, 0xA0, 85]);
            respond_to_next(&mut sent, &mock, 0, payload).await
        });

        let level = battery.level().await.unwrap();
        assert_eq!(level.voltage_mv, 4000);
        assert_eq!(level.percent, 85);

        let wire = responder.await.unwrap();
        assert_eq!(wire[0], DEVICE_BATTERY);
        assert_eq!(wire[1], CMD_BATTERY_GET_LEVEL);
    }

    #[tokio::test]
    async fn test_battery_event_stream() {
        let (link, mock) = ready_link();
        let battery = Battery::new(link);
        let mut events = battery.events();

        push_event(&mock, DEVICE_BATTERY, EVT_BATTERY_LEVEL, &[0, 0, 0, 1, 0x0E, 0x74, 60]);

        match events.next().await.unwrap() {
            TelemetryEvent::BatteryLevel(level) => {
                assert_eq!(level.voltage_mv, 3700);
                assert_eq!(level.percent, 60);
            }
            other => panic!("expected BatteryLevel, got {:?}", other),
        }
    }
}
