//! Downward-facing color sensor array.

use rootbot_protocol::{Command, LightingOption, COLOR_BANK_MAX, DEVICE_COLOR_SENSOR};

use crate::devices::EventStream;
use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the color sensors (device id 4).
///
/// The 32 sensors are addressed in banks of eight; raw reads return the
/// bank's eight 12-bit ADC counts as big-endian u16 values.
pub struct ColorSensor<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> ColorSensor<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        ColorSensor { link }
    }

    /// Read raw ADC counts from one bank of eight sensors.
    ///
    /// `bank` must be 0..=3; out-of-range banks are rejected before any
    /// frame is built.
    pub async fn color_data(
        &self,
        bank: u8,
        lighting: LightingOption,
    ) -> Result<[u16; 8], ClientError> {
        if bank > COLOR_BANK_MAX {
            return Err(ClientError::Validation(format!(
                "color sensor bank {} is out of range 0..={}",
                bank, COLOR_BANK_MAX
            )));
        }
        let payload = self
            .link
            .request(&Command::GetColorData { bank, lighting })
            .await?;

        let mut counts = [0u16; 8];
        for (i, chunk) in payload.chunks_exact(2).enumerate() {
            counts[i] = u16::from_be_bytes([chunk[0], chunk[1]]);
        }
        Ok(counts)
    }

    /// Subscribe to new-color events.
    pub fn events(&self) -> EventStream {
        EventStream::new(self.link.subscribe(DEVICE_COLOR_SENSOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ready_link, respond_to_next};
    use rootbot_protocol::{CMD_COLOR_GET_DATA, COLOR_FORMAT_ADC, PAYLOAD_SIZE};

    #[tokio::test(start_paused = true)]
    async fn test_color_data_request_and_decode() {
        let (link, mock) = ready_link();
        let sensor = ColorSensor::new(link);
        let mut sent = mock.take_sent_receiver();

        let responder = tokio::spawn(async move {
            let mut payload = [0u8; PAYLOAD_SIZE];
            payload[0] = 0x0F;
            payload[1] = 0xFF;
            payload[14] = 0x01;
            payload[15] = 0x02;
            respond_to_next(&mut sent, &mock, 0, payload).await
        });

        let counts = sensor.color_data(2, LightingOption::All).await.unwrap();
        assert_eq!(counts[0], 0x0FFF);
        assert_eq!(counts[7], 0x0102);

        let wire = responder.await.unwrap();
        assert_eq!(wire[0], DEVICE_COLOR_SENSOR);
        assert_eq!(wire[1], CMD_COLOR_GET_DATA);
        assert_eq!(&wire[3..6], &[2, 4, COLOR_FORMAT_ADC]);
    }

    #[tokio::test]
    async fn test_out_of_range_bank_sends_nothing() {
        let (link, mock) = ready_link();
        let sensor = ColorSensor::new(link);

        let err = sensor
            .color_data(4, LightingOption::Off)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(mock.sent_count(), 0);
    }
}
