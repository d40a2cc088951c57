use crate::record::FieldCursor;

/// Maximum retained length of the zone code, in bytes. Longer zone fields
/// are truncated silently.
pub const MAX_ZONE_LEN: usize = 31;

/// One parsed observation of a locational price spread.
///
/// Borrows the zone code from the input line; records are produced fresh
/// per line and consumed once by the aggregation step. The congestion and
/// energy spreads are not stored: they are derived at consumption time
/// from the day-ahead and real-time components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadRecord<'a> {
    /// Priced-node identifier, the primary aggregation key
    pub pnode_id: i32,
    /// Zone code, truncated to [`MAX_ZONE_LEN`] bytes
    pub zone: &'a str,
    /// Day-ahead minus real-time price spread, computed upstream
    pub spread: f64,
    /// Day-ahead congestion component
    pub congestion_da: f64,
    /// Real-time congestion component
    pub congestion_rt: f64,
    /// Day-ahead energy component
    pub energy_da: f64,
    /// Real-time energy component
    pub energy_rt: f64,
    /// Hour of day extracted from the timestamp; may fall outside [0, 23]
    /// for malformed timestamps
    pub hour: i32,
}

impl<'a> SpreadRecord<'a> {
    /// Parse one data line of the fixed column schema.
    ///
    /// The schema is fixed, so fields are visited by position in a single
    /// left-to-right pass rather than tokenizing the whole line: columns
    /// 7/9 carry the day-ahead congestion and energy components, 17/19 the
    /// real-time ones, 20 the timestamp (only the hour is read), 21 the
    /// node id, 22 the zone code, and 23 the spread. Loss components and
    /// the leading datetime columns are skipped without materializing
    /// their values.
    ///
    /// Returns `None` for a row that cannot be parsed: a short line or a
    /// non-numeric value in a float column. Such rows are dropped by the
    /// caller and never reach an accumulator. Malformed integer columns
    /// never fail the row: a non-digit id coerces to 0 and an overlong
    /// one wraps, then truncates to the low 32 bits.
    pub fn parse(line: &'a str) -> Option<SpreadRecord<'a>> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut cursor = FieldCursor::new(line);

        for _ in 0..7 {
            cursor.skip_field();
        }
        let congestion_da = cursor.parse_float()?;

        cursor.skip_field(); // loss_da
        let energy_da = cursor.parse_float()?;

        for _ in 0..7 {
            cursor.skip_field();
        }
        let congestion_rt = cursor.parse_float()?;

        cursor.skip_field(); // loss_rt
        let energy_rt = cursor.parse_float()?;

        let hour = cursor.parse_hour();
        // Ids beyond the i32 range truncate to the low 32 bits, the same
        // silent coercion parse_int applies to a non-digit run
        let pnode_id = cursor.parse_int() as i32;
        let zone = cursor.parse_text(MAX_ZONE_LEN);
        let spread = cursor.parse_float()?;

        Some(SpreadRecord {
            pnode_id,
            zone,
            spread,
            congestion_da,
            congestion_rt,
            energy_da,
            energy_rt,
            hour,
        })
    }

    /// Day-ahead minus real-time congestion spread.
    pub fn congestion_spread(&self) -> f64 {
        self.congestion_da - self.congestion_rt
    }

    /// Day-ahead minus real-time energy spread.
    pub fn energy_spread(&self) -> f64 {
        self.energy_da - self.energy_rt
    }
}
