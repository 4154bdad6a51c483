//! Binary layout of snapshot records
//!
//! All integers are little-endian. A snapshot file is:
//!
//! ```text
//! +-----------------+
//! | Magic           | 4 bytes: b"LOTS"
//! +-----------------+
//! | Format version  | u16 LE
//! +-----------------+
//! | Saved-at        | length-prefixed RFC3339 string
//! +-----------------+
//! | Group count     | u32 LE
//! +-----------------+
//! | Group records   | one per manufacturer group, in sorted order
//! +-----------------+
//! ```
//!
//! and each group record is:
//!
//! ```text
//! +-----------------+
//! | Record length   | u32 LE (total, including this field and the checksum)
//! +-----------------+
//! | Group name      | length-prefixed string
//! +-----------------+
//! | Car count       | u32 LE
//! +-----------------+
//! | Cars            | per car: manufacturer (length-prefixed string),
//! |                 | price (i64 LE), age (i32 LE), distance (f64 LE bits)
//! +-----------------+
//! | Checksum        | u32 LE, CRC32 over record length + body
//! +-----------------+
//! ```

use std::io::{self, Cursor, Read};

use crate::inventory::{ManufacturerGroup, Vehicle};

use super::checksum::compute_checksum;

/// First four bytes of every snapshot file.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"LOTS";

/// Snapshot format version this build reads and writes.
pub const FORMAT_VERSION: u16 = 1;

/// Smallest possible group record: length + empty name + car count + checksum.
pub(super) const MIN_RECORD_SIZE: usize = 4 + 4 + 4 + 4;

/// Serializes one manufacturer group into a checksummed record.
pub(super) fn encode_group(group: &ManufacturerGroup) -> Vec<u8> {
    let mut body = Vec::new();

    write_string(&mut body, group.name());
    body.extend_from_slice(&(group.car_count() as u32).to_le_bytes());
    for car in group.cars() {
        write_string(&mut body, car.manufacturer());
        body.extend_from_slice(&car.price().to_le_bytes());
        body.extend_from_slice(&car.age().to_le_bytes());
        body.extend_from_slice(&car.distance_km().to_le_bytes());
    }

    let record_length = (4 + body.len() + 4) as u32;

    // Checksum covers length + body.
    let mut checksum_data = Vec::with_capacity(4 + body.len());
    checksum_data.extend_from_slice(&record_length.to_le_bytes());
    checksum_data.extend_from_slice(&body);
    let checksum = compute_checksum(&checksum_data);

    let mut record = Vec::with_capacity(record_length as usize);
    record.extend_from_slice(&record_length.to_le_bytes());
    record.extend_from_slice(&body);
    record.extend_from_slice(&checksum.to_le_bytes());

    record
}

/// Deserializes one group record from the start of `data`, verifying its
/// checksum. Returns the group and the number of bytes consumed.
pub(super) fn decode_group(data: &[u8]) -> io::Result<(ManufacturerGroup, usize)> {
    if data.len() < MIN_RECORD_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "record too short",
        ));
    }

    let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    if record_length < MIN_RECORD_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid record length: {}", record_length),
        ));
    }

    if data.len() < record_length {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "record truncated: expected {} bytes, got {}",
                record_length,
                data.len()
            ),
        ));
    }

    let checksum_offset = record_length - 4;
    let stored_checksum = u32::from_le_bytes([
        data[checksum_offset],
        data[checksum_offset + 1],
        data[checksum_offset + 2],
        data[checksum_offset + 3],
    ]);
    let computed_checksum = compute_checksum(&data[0..checksum_offset]);

    if computed_checksum != stored_checksum {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "checksum mismatch: computed {:08x}, stored {:08x}",
                computed_checksum, stored_checksum
            ),
        ));
    }

    let mut cursor = Cursor::new(&data[4..checksum_offset]);

    let name = read_string(&mut cursor)?;
    let car_count = read_u32(&mut cursor)? as usize;

    let mut cars = Vec::with_capacity(car_count);
    for _ in 0..car_count {
        let manufacturer = read_string(&mut cursor)?;
        let price = read_i64(&mut cursor)?;
        let age = read_i32(&mut cursor)?;
        let distance_km = read_f64(&mut cursor)?;
        cars.push(Vehicle::new(manufacturer, price, age, distance_km));
    }

    if cursor.position() != (checksum_offset - 4) as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "trailing bytes inside record body",
        ));
    }

    Ok((ManufacturerGroup::from_parts(name, cars), record_length))
}

/// Appends a length-prefixed UTF-8 string.
pub(super) fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Reads a length-prefixed UTF-8 string.
fn read_string(cursor: &mut Cursor<&[u8]>) -> io::Result<String> {
    let len = read_u32(cursor)? as usize;

    let remaining = cursor.get_ref().len() as u64 - cursor.position();
    if len as u64 > remaining {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("string length {} exceeds remaining {} bytes", len, remaining),
        ));
    }

    let mut buf = vec![0u8; len];
    cursor.read_exact(&mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("invalid UTF-8: {}", e)))
}

fn read_u32(cursor: &mut Cursor<&[u8]>) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    cursor.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i32(cursor: &mut Cursor<&[u8]>) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    cursor.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_i64(cursor: &mut Cursor<&[u8]>) -> io::Result<i64> {
    let mut buf = [0u8; 8];
    cursor.read_exact(&mut buf)?;
    Ok(i64::from_le_bytes(buf))
}

fn read_f64(cursor: &mut Cursor<&[u8]>) -> io::Result<f64> {
    let mut buf = [0u8; 8];
    cursor.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_group() -> ManufacturerGroup {
        let mut group = ManufacturerGroup::new("Toyota");
        group.add_car(Vehicle::new("Toyota", 15000, 4, 62000.5));
        group.add_car(Vehicle::new("TOYOTA", 8000, 9, 140000.0));
        group
    }

    #[test]
    fn test_record_round_trip() {
        let group = sample_group();
        let encoded = encode_group(&group);
        let (decoded, consumed) = decode_group(&encoded).unwrap();

        assert_eq!(consumed, encoded.len());
        assert_eq!(decoded.name(), "Toyota");
        assert_eq!(decoded.cars(), group.cars());
    }

    #[test]
    fn test_empty_group_round_trip() {
        let group = ManufacturerGroup::new("Mazda");
        let encoded = encode_group(&group);
        let (decoded, consumed) = decode_group(&encoded).unwrap();

        assert_eq!(consumed, encoded.len());
        assert_eq!(decoded.name(), "Mazda");
        assert!(decoded.cars().is_empty());
    }

    #[test]
    fn test_distance_survives_exactly() {
        let mut group = ManufacturerGroup::new("Audi");
        group.add_car(Vehicle::new("Audi", 1, 1, 12345.6789));
        let (decoded, _) = decode_group(&encode_group(&group)).unwrap();
        assert_eq!(decoded.cars()[0].distance_km(), 12345.6789);
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let encoded = encode_group(&sample_group());

        let mut corrupted = encoded.clone();
        let mid = corrupted.len() / 2;
        corrupted[mid] ^= 0xFF;

        let err = decode_group(&corrupted).unwrap_err();
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_truncated_record_rejected() {
        let encoded = encode_group(&sample_group());
        let result = decode_group(&encoded[..encoded.len() - 5]);
        assert!(result.is_err());
    }

    #[test]
    fn test_short_input_rejected() {
        assert!(decode_group(&[0u8; 3]).is_err());
    }

    #[test]
    fn test_deterministic_encoding() {
        let group = sample_group();
        assert_eq!(encode_group(&group), encode_group(&group));
    }
}
