use shared::RoomRecord;

/// Rooms that seat at least `kapasitas` people, optionally restricted to
/// locations containing `lokasi` (case-insensitive), closest fit first.
///
/// Rooms with the same distance keep their catalogue order.
pub fn recommend(rooms: Vec<RoomRecord>, kapasitas: i32, lokasi: Option<&str>) -> Vec<RoomRecord> {
    let needle = lokasi
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase);

    let mut matches: Vec<RoomRecord> = rooms
        .into_iter()
        .filter(|room| room.kapasitas >= kapasitas)
        .filter(|room| match &needle {
            Some(needle) => room
                .lokasi
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .collect();

    matches.sort_by_key(|room| (i64::from(room.kapasitas) - i64::from(kapasitas)).abs());
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(room_id: i32, kapasitas: i32, lokasi: Option<&str>) -> RoomRecord {
        RoomRecord {
            room_id,
            nama_ruangan: format!("Room {}", room_id),
            kapasitas,
            fasilitas: None,
            lokasi: lokasi.map(str::to_string),
        }
    }

    fn ids(rooms: &[RoomRecord]) -> Vec<i32> {
        rooms.iter().map(|r| r.room_id).collect()
    }

    #[test]
    fn closest_capacity_first() {
        let rooms = vec![room(1, 200, None), room(2, 40, None), room(3, 60, None), room(4, 20, None)];
        assert_eq!(ids(&recommend(rooms, 50, None)), vec![3, 1]);
    }

    #[test]
    fn ties_keep_catalogue_order() {
        let rooms = vec![room(1, 80, None), room(2, 80, None), room(3, 50, None)];
        assert_eq!(ids(&recommend(rooms, 50, None)), vec![3, 1, 2]);
    }

    #[test]
    fn location_filter_is_case_insensitive_substring() {
        let rooms = vec![
            room(1, 100, Some("Gedung A Lantai 2")),
            room(2, 100, Some("Gedung B")),
            room(3, 100, None),
        ];
        assert_eq!(ids(&recommend(rooms.clone(), 10, Some("gedung a"))), vec![1]);
        assert_eq!(ids(&recommend(rooms, 10, Some("  "))), vec![1, 2, 3]);
    }

    #[test]
    fn no_room_large_enough() {
        assert!(recommend(vec![room(1, 10, None)], 11, None).is_empty());
    }
}
