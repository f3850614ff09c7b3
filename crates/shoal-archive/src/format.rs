use std::io::{self, Read, Seek};

/// Compression codec applied to the archive byte stream before tar parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
}

impl Compression {
    /// Wrap `reader` in the decoder for this codec.
    pub fn decoder<R: Read>(self, reader: R) -> Decoder<R> {
        match self {
            Self::None => Decoder::Passthrough(reader),
            Self::Gzip => Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(reader))),
        }
    }

    pub fn is_compressed(self) -> bool {
        matches!(self, Self::Gzip)
    }
}

/// Decoder wrapper so both codecs present a plain `Read`.
pub enum Decoder<R> {
    Passthrough(R),
    Gzip(Box<flate2::read::GzDecoder<R>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
        }
    }
}

/// Detect the codec from the leading bytes of the stream.
///
/// Gzip is identified by its two-byte magic. A plain tar needs a full
/// 512-byte header block; the magic at offset 257 is `ustar` for both the
/// POSIX (`ustar\0`) and GNU (`ustar  \0`) flavors, so only the five magic
/// bytes are compared.
pub fn detect_compression(data: &[u8]) -> Option<Compression> {
    match data {
        [0x1F, 0x8B, ..] => Some(Compression::Gzip),
        _ if is_tar_header(data) => Some(Compression::None),
        _ => None,
    }
}

fn is_tar_header(data: &[u8]) -> bool {
    data.len() >= 512 && &data[257..262] == b"ustar"
}

/// Read up to one header block, detect the codec, and rewind.
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Option<Compression>> {
    let mut header = [0u8; 512];
    let mut filled = 0;
    while filled < header.len() {
        let n = reader.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.rewind()?;
    Ok(detect_compression(&header[..filled]))
}
