//! Output side of the key-frame pipeline.
//!
//! [`ImageWriter`] looks up an FFmpeg encoder by name, opens the output
//! container for the target path and writes exactly one encoded picture.
//! It is opened before any packet is read so that an unknown codec or an
//! unwritable path fails without touching the input stream.

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Packet, Rational,
    codec::context::Context as CodecContext,
    encoder::video::Encoder as VideoEncoder,
    format::{Flags as FormatFlags, Pixel, context::Output},
    frame::Video as VideoFrame,
    picture,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};

use crate::error::ShotError;
use crate::source::SourceFormat;

pub(crate) struct ImageWriter {
    output_context: Output,
    encoder: VideoEncoder,
    stream_index: usize,
    time_base: Rational,
    pixel_format: Pixel,
    width: u32,
    height: u32,
    path: PathBuf,
}

impl ImageWriter {
    /// Prepare `codec_name` to encode pictures shaped like `source` into
    /// the container guessed from `path`, and write the container header.
    pub(crate) fn open(
        codec_name: &str,
        path: &Path,
        source: &SourceFormat,
    ) -> Result<Self, ShotError> {
        let codec = ffmpeg_next::encoder::find_by_name(codec_name)
            .ok_or_else(|| ShotError::EncoderNotFound(codec_name.to_string()))?;

        let pixel_format = codec
            .video()
            .map_err(|_| ShotError::EncoderOpen(format!("{codec_name} is not a video encoder")))?
            .formats()
            .and_then(|mut formats| formats.next())
            .unwrap_or(source.pixel_format);

        let mut output_context =
            ffmpeg_next::format::output(path).map_err(|error| ShotError::OutputOpen {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;

        // Must be read before add_stream borrows the context.
        let needs_global_header = output_context
            .format()
            .flags()
            .contains(FormatFlags::GLOBAL_HEADER);

        let mut stream = output_context
            .add_stream(codec)
            .map_err(|error| ShotError::OutputOpen {
                path: path.to_path_buf(),
                reason: format!("cannot add stream: {error}"),
            })?;
        let stream_index = stream.index();

        let mut encoder = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| ShotError::EncoderOpen(error.to_string()))?
            .encoder()
            .video()
            .map_err(|error| ShotError::EncoderOpen(error.to_string()))?;

        let time_base = source.frame_rate.invert();
        encoder.set_width(source.width);
        encoder.set_height(source.height);
        encoder.set_aspect_ratio(source.aspect_ratio);
        encoder.set_format(pixel_format);
        encoder.set_time_base(time_base);

        if needs_global_header {
            unsafe {
                (*encoder.as_mut_ptr()).flags |=
                    ffmpeg_sys_next::AV_CODEC_FLAG_GLOBAL_HEADER as i32;
            }
        }

        let encoder = encoder
            .open_as(codec)
            .map_err(|error| ShotError::EncoderOpen(format!("{codec_name}: {error}")))?;

        stream.set_parameters(&encoder);
        stream.set_time_base(time_base);

        log::debug!(
            "Opened {codec_name} encoder ({}x{}, {:?}) for {}",
            source.width,
            source.height,
            pixel_format,
            path.display()
        );

        output_context
            .write_header()
            .map_err(|error| ShotError::Mux(format!("cannot write header: {error}")))?;

        Ok(Self {
            output_context,
            encoder,
            stream_index,
            time_base,
            pixel_format,
            width: source.width,
            height: source.height,
            path: path.to_path_buf(),
        })
    }

    /// Convert, encode and mux `frame`, then finalise the output file.
    pub(crate) fn write(mut self, frame: &VideoFrame) -> Result<(), ShotError> {
        let mut scaler = ScalingContext::get(
            frame.format(),
            frame.width(),
            frame.height(),
            self.pixel_format,
            self.width,
            self.height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|error| ShotError::Scaling(error.to_string()))?;

        let mut converted = VideoFrame::empty();
        scaler
            .run(frame, &mut converted)
            .map_err(|error| ShotError::Scaling(error.to_string()))?;
        converted.set_pts(Some(0));
        converted.set_kind(picture::Type::None);

        self.encoder
            .send_frame(&converted)
            .map_err(|error| ShotError::Encode(format!("send_frame failed: {error}")))?;
        self.encoder
            .send_eof()
            .map_err(|error| ShotError::Encode(format!("send_eof failed: {error}")))?;

        let stream_time_base = self
            .output_context
            .stream(self.stream_index)
            .map(|stream| stream.time_base())
            .ok_or_else(|| ShotError::Mux("output stream is missing".to_string()))?;

        let mut packet = Packet::empty();
        let mut written_packets = 0_usize;
        while self.encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(self.stream_index);
            packet.rescale_ts(self.time_base, stream_time_base);
            packet
                .write_interleaved(&mut self.output_context)
                .map_err(|error| ShotError::Mux(format!("write packet failed: {error}")))?;
            written_packets += 1;
        }

        if written_packets == 0 {
            return Err(ShotError::Encode(
                "encoder produced no output for the key frame".to_string(),
            ));
        }

        self.output_context
            .write_trailer()
            .map_err(|error| ShotError::Mux(format!("cannot write trailer: {error}")))?;

        log::info!("Wrote key frame to {}", self.path.display());
        Ok(())
    }
}
