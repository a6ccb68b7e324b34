//! Buzzer and speech.

use rootbot_protocol::{Command, MAX_NAME_LEN};

use crate::error::ClientError;
use crate::link::RobotLink;
use crate::transport::ByteChannel;

/// Handle for the sound device (id 5).
pub struct Sound<C: ByteChannel> {
    link: RobotLink<C>,
}

impl<C: ByteChannel> Sound<C> {
    pub(crate) fn new(link: RobotLink<C>) -> Self {
        Sound { link }
    }

    /// Play a note and wait until it finishes sounding.
    pub async fn play_note(&self, frequency_hz: u32, duration_ms: u16) -> Result<(), ClientError> {
        self.link
            .request(&Command::PlayNote { frequency_hz, duration_ms })
            .await?;
        Ok(())
    }

    /// Immediately silence any playing note.
    pub async fn stop_note(&self) -> Result<(), ClientError> {
        self.link.send(&Command::StopNote).await?;
        Ok(())
    }

    /// Speak a phrase in robot language and wait until it finishes.
    ///
    /// The phrase must fit in the 16-byte payload.
    pub async fn say_phrase(&self, phrase: &str) -> Result<(), ClientError> {
        if phrase.len() > MAX_NAME_LEN {
            return Err(ClientError::Validation(format!(
                "phrase is {} bytes, the limit is {}",
                phrase.len(),
                MAX_NAME_LEN
            )));
        }
        self.link
            .request(&Command::SayPhrase { phrase: phrase.to_owned() })
            .await?;
        Ok(())
    }
}
