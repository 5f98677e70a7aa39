//! Input side of the key-frame pipeline.
//!
//! [`KeyframeSource`] opens a locator (file path or URL), picks the first
//! video stream and decodes packets until a key frame comes out of the
//! decoder.

use ffmpeg_next::{
    Dictionary, Error as FfmpegError, Packet, Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
};

use crate::error::ShotError;
use crate::timeout::timeout_option_micros;

/// Frame rate assumed when the container reports none.
const FALLBACK_FRAME_RATE: (i32, i32) = (25, 1);

/// Properties of the selected video stream that the output encoder is
/// configured from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceFormat {
    pub width: u32,
    pub height: u32,
    pub pixel_format: Pixel,
    pub aspect_ratio: Rational,
    pub frame_rate: Rational,
}

/// An opened input positioned on its first video stream.
pub(crate) struct KeyframeSource {
    input_context: Input,
    decoder: VideoDecoder,
    stream_index: usize,
    frame_rate: Rational,
}

impl KeyframeSource {
    /// Open `locator` and prepare a decoder for its first video stream.
    ///
    /// A non-zero `timeout_ms` is passed to FFmpeg as the `timeout` option;
    /// zero leaves FFmpeg's default (no timeout).
    pub(crate) fn open(locator: &str, timeout_ms: u32) -> Result<Self, ShotError> {
        crate::ffmpeg::initialize()?;

        log::debug!("Opening input {locator} (timeout={timeout_ms} ms)");

        let mut options = Dictionary::new();
        if let Some(micros) = timeout_option_micros(timeout_ms) {
            options.set("timeout", &micros.to_string());
        }

        let input_context = ffmpeg_next::format::input_with_dictionary(locator, options)
            .map_err(|error| ShotError::InputOpen {
                locator: locator.to_string(),
                reason: error.to_string(),
            })?;

        let (stream_index, frame_rate, decoder) = {
            let stream = input_context
                .streams()
                .find(|stream| stream.parameters().medium() == Type::Video)
                .ok_or(ShotError::NoVideoStream)?;

            let frame_rate = pick_frame_rate(stream.avg_frame_rate(), stream.rate());
            let decoder_context = CodecContext::from_parameters(stream.parameters())
                .map_err(|error| ShotError::DecoderOpen(error.to_string()))?;
            let decoder = decoder_context
                .decoder()
                .video()
                .map_err(|error| ShotError::DecoderOpen(error.to_string()))?;

            (stream.index(), frame_rate, decoder)
        };

        log::debug!(
            "Selected video stream {} ({}x{}, codec={}, {}/{} fps)",
            stream_index,
            decoder.width(),
            decoder.height(),
            decoder
                .codec()
                .map(|codec| codec.name().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            frame_rate.numerator(),
            frame_rate.denominator(),
        );

        Ok(Self {
            input_context,
            decoder,
            stream_index,
            frame_rate,
        })
    }

    /// Stream properties the output encoder is configured from.
    pub(crate) fn format(&self) -> SourceFormat {
        SourceFormat {
            width: self.decoder.width(),
            height: self.decoder.height(),
            pixel_format: self.decoder.format(),
            aspect_ratio: self.decoder.aspect_ratio(),
            frame_rate: self.frame_rate,
        }
    }

    /// Decode until the first key frame and return it.
    ///
    /// Packets the decoder rejects are skipped; live streams joined
    /// mid-GOP start with packets that reference frames we never saw.
    pub(crate) fn first_keyframe(&mut self) -> Result<VideoFrame, ShotError> {
        let mut packet = Packet::empty();
        let mut decoded_frame = VideoFrame::empty();
        let mut skipped_packets: u64 = 0;

        loop {
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() != self.stream_index {
                        continue;
                    }

                    if let Err(error) = self.decoder.send_packet(&packet) {
                        skipped_packets += 1;
                        log::debug!(
                            "Skipping undecodable packet (pts={:?}): {error}",
                            packet.pts()
                        );
                        continue;
                    }

                    if self.receive_keyframe(&mut decoded_frame) {
                        log::debug!(
                            "Key frame found (pts={:?}, skipped {skipped_packets} packets)",
                            decoded_frame.pts()
                        );
                        return Ok(decoded_frame);
                    }
                }
                Err(FfmpegError::Eof) => break,
                Err(error) => return Err(ShotError::from(error)),
            }
        }

        self.decoder.send_eof()?;
        if self.receive_keyframe(&mut decoded_frame) {
            log::debug!("Key frame found while draining decoder");
            return Ok(decoded_frame);
        }

        Err(ShotError::NoKeyFrame)
    }

    /// Pull every pending frame from the decoder, stopping at the first key
    /// frame. Returns `true` if `frame` now holds one.
    fn receive_keyframe(&mut self, frame: &mut VideoFrame) -> bool {
        while self.decoder.receive_frame(frame).is_ok() {
            if frame.is_key() {
                frame.set_pts(frame.timestamp());
                return true;
            }
        }
        false
    }
}

fn pick_frame_rate(average: Rational, fallback: Rational) -> Rational {
    let usable = |rate: Rational| rate.numerator() > 0 && rate.denominator() > 0;
    if usable(average) {
        average
    } else if usable(fallback) {
        fallback
    } else {
        Rational::new(FALLBACK_FRAME_RATE.0, FALLBACK_FRAME_RATE.1)
    }
}

#[cfg(test)]
mod tests {
    use ffmpeg_next::Rational;

    use super::pick_frame_rate;

    #[test]
    fn prefers_average_frame_rate() {
        let rate = pick_frame_rate(Rational::new(30000, 1001), Rational::new(60, 1));
        assert_eq!(rate, Rational::new(30000, 1001));
    }

    #[test]
    fn falls_back_to_stream_rate_then_default() {
        let rate = pick_frame_rate(Rational::new(0, 1), Rational::new(24, 1));
        assert_eq!(rate, Rational::new(24, 1));

        let rate = pick_frame_rate(Rational::new(0, 0), Rational::new(0, 0));
        assert_eq!(rate, Rational::new(25, 1));
    }
}
