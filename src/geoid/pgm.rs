//! Parser for geoid grids stored as 16-bit PGM images
//!
//! The layout is the one GeographicLib distributes its geoid models in:
//!
//! ```text
//! P5
//! # Description WGS84 EGM96, 5-minute grid
//! # Offset -108
//! # Scale 0.003
//! 4320 2161
//! 65535
//! <width * height big-endian u16 samples>
//! ```
//!
//! Row 0 is latitude 90°N, columns run eastward from longitude 0°, and the
//! last row is 90°S. A sample `s` encodes the height `offset + scale * s`.

use crate::validation::error::{GeodesyError, Result};

/// Decoded geoid height grid
#[derive(Debug, Clone)]
pub struct GeoidGrid {
    width: usize,
    height: usize,
    offset: f64,
    scale: f64,
    description: Option<String>,
    samples: Vec<u16>,
}

impl GeoidGrid {
    /// Decode a PGM geoid grid from raw bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut header = HeaderReader::new(bytes);

        if header.token()? != "P5" {
            return Err(GeodesyError::invalid_geoid("missing P5 magic number"));
        }
        let width = header.number("width")?;
        let height = header.number("height")?;
        let max_value = header.number("max value")?;

        if max_value != usize::from(u16::MAX) {
            return Err(GeodesyError::invalid_geoid(format!(
                "expected 16-bit samples (max value 65535), found max value {max_value}"
            )));
        }
        if height < 4 || (height - 1).checked_mul(2) != Some(width) {
            return Err(GeodesyError::invalid_geoid(format!(
                "{width}x{height} is not a global grid with equal spacing in latitude and longitude"
            )));
        }

        let offset = header
            .offset
            .ok_or_else(|| GeodesyError::invalid_geoid("missing Offset header"))?;
        let scale = header
            .scale
            .ok_or_else(|| GeodesyError::invalid_geoid("missing Scale header"))?;

        // Exactly one whitespace byte separates the header from the samples
        let data = header.remaining()?;
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(2))
            .ok_or_else(|| GeodesyError::invalid_geoid(format!("{width}x{height} is too large")))?;
        if data.len() != expected {
            return Err(GeodesyError::invalid_geoid(format!(
                "expected {expected} bytes of samples, found {}",
                data.len()
            )));
        }

        let samples = data
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            width,
            height,
            offset,
            scale,
            description: header.description,
            samples,
        })
    }

    /// Number of longitude columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of latitude rows, both poles included
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid spacing in degrees
    pub fn resolution_deg(&self) -> f64 {
        360.0 / self.width as f64
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Geoid height in meters at a grid node; columns wrap around the globe
    pub fn node(&self, row: usize, column: usize) -> f64 {
        let column = column % self.width;
        let sample = self.samples[row * self.width + column];
        self.offset + self.scale * f64::from(sample)
    }
}

/// Tokenizer for the ASCII part of a PGM file
struct HeaderReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    offset: Option<f64>,
    scale: Option<f64>,
    description: Option<String>,
}

impl<'a> HeaderReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            offset: None,
            scale: None,
            description: None,
        }
    }

    /// Next whitespace-delimited token, collecting metadata from comments on the way
    fn token(&mut self) -> Result<&'a str> {
        loop {
            while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.bytes.len() {
                return Err(GeodesyError::invalid_geoid("header ends early"));
            }
            if self.bytes[self.pos] == b'#' {
                self.comment();
                continue;
            }

            let bytes = self.bytes;
            let start = self.pos;
            while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            return std::str::from_utf8(&bytes[start..self.pos])
                .map_err(|_| GeodesyError::invalid_geoid("header is not ASCII"));
        }
    }

    fn number(&mut self, field: &str) -> Result<usize> {
        let token = self.token()?;
        token
            .parse()
            .map_err(|_| GeodesyError::invalid_geoid(format!("bad {field} '{token}'")))
    }

    fn comment(&mut self) {
        let start = self.pos + 1;
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
        let line = String::from_utf8_lossy(&self.bytes[start..self.pos]);
        let line = line.trim();
        let (key, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let value = value.trim();

        match key {
            "Offset" => self.offset = value.parse().ok(),
            "Scale" => self.scale = value.parse().ok(),
            "Description" => self.description = Some(value.to_string()),
            _ => {}
        }
    }

    fn remaining(&self) -> Result<&'a [u8]> {
        let bytes = self.bytes;
        match bytes.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => Ok(&bytes[self.pos + 1..]),
            _ => Err(GeodesyError::invalid_geoid("no sample data after header")),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Encode a grid the way GeographicLib writes one
    pub(crate) fn encode_pgm(
        width: usize,
        height: usize,
        offset: f64,
        scale: f64,
        samples: &[u16],
    ) -> Vec<u8> {
        let mut bytes = format!(
            "P5\n# Description synthetic test grid\n# Offset {offset}\n# Scale {scale}\n\
             # Origin 90N 0E\n{width} {height}\n65535\n"
        )
        .into_bytes();
        for s in samples {
            bytes.extend_from_slice(&s.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn test_parse_header_and_samples() {
        let (width, height) = (8, 5);
        let samples: Vec<u16> = (0..(width * height) as u16).collect();
        let bytes = encode_pgm(width, height, -108.0, 0.003, &samples);

        let grid = GeoidGrid::parse(&bytes).unwrap();
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.offset(), -108.0);
        assert_eq!(grid.scale(), 0.003);
        assert_eq!(grid.resolution_deg(), 45.0);
        assert_eq!(grid.description(), Some("synthetic test grid"));

        assert!((grid.node(0, 0) + 108.0).abs() < 1e-12);
        assert!((grid.node(1, 2) - (-108.0 + 0.003 * 10.0)).abs() < 1e-12);
        // Column index wraps past the antimeridian
        assert_eq!(grid.node(2, 8), grid.node(2, 0));
    }

    #[test]
    fn test_rejects_wrong_magic() {
        let mut bytes = encode_pgm(8, 5, 0.0, 1.0, &[0; 40]);
        bytes[1] = b'2';
        let err = GeoidGrid::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("P5"));
    }

    #[test]
    fn test_rejects_missing_scale() {
        let mut bytes = b"P5\n# Offset -108\n8 5\n65535\n".to_vec();
        bytes.extend(std::iter::repeat(0u8).take(80));
        let err = GeoidGrid::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("Scale"));
    }

    #[test]
    fn test_rejects_truncated_samples() {
        let mut bytes = encode_pgm(8, 5, 0.0, 1.0, &[0; 40]);
        bytes.truncate(bytes.len() - 3);
        let err = GeoidGrid::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("bytes of samples"));
    }

    #[test]
    fn test_rejects_eight_bit_images() {
        let bytes = b"P5\n# Offset 0\n# Scale 1\n8 5\n255\n".to_vec();
        let err = GeoidGrid::parse(&bytes).unwrap_err();
        assert!(err.to_string().contains("16-bit"));
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        let header = format!("P5\n# Offset 0\n# Scale 1\n8 {}\n65535\n", usize::MAX);
        let err = GeoidGrid::parse(header.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("not a global grid"));

        let width = usize::MAX - 1;
        let height = usize::MAX / 2 + 1;
        let header = format!("P5\n# Offset 0\n# Scale 1\n{width} {height}\n65535\n");
        let err = GeoidGrid::parse(header.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_rejects_non_global_shape() {
        let bytes = encode_pgm(10, 5, 0.0, 1.0, &[0; 50]);
        assert!(GeoidGrid::parse(&bytes).is_err());
    }
}
