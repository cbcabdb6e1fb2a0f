use broadside::{GameError, Orientation, Ship, FleetLayout};

#[test]
fn test_new_and_cells() -> Result<(), GameError> {
    let ship = Ship::new(4, 0, 0, Orientation::Vertical)?;
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    for (r, c) in cells {
        assert!(ship.contains(r, c));
        assert!(ship.mask().contains(r, c));
    }
    assert!(!ship.contains(4, 0));
    assert_eq!(ship.mask().count_ones(), 4);
    Ok(())
}

#[test]
fn test_new_rejects_off_board() {
    assert_eq!(
        Ship::new(5, 0, 7, Orientation::Horizontal).unwrap_err(),
        GameError::OutOfBounds { row: 0, col: 10 }
    );
    assert_eq!(
        Ship::new(3, 9, 0, Orientation::Vertical).unwrap_err(),
        GameError::OutOfBounds { row: 10, col: 0 }
    );
    assert!(Ship::new(5, 0, 5, Orientation::Horizontal).is_ok());
}

#[test]
fn test_new_rejects_bad_length() {
    assert!(matches!(
        Ship::new(1, 0, 0, Orientation::Horizontal),
        Err(GameError::InvalidState(_))
    ));
    assert!(matches!(
        Ship::new(6, 0, 0, Orientation::Horizontal),
        Err(GameError::InvalidState(_))
    ));
}

#[test]
fn test_register_hit_and_sunk() -> Result<(), GameError> {
    let mut ship = Ship::new(2, 1, 1, Orientation::Horizontal)?;
    assert!(!ship.is_sunk());
    assert!(!ship.register_hit());
    assert_eq!(ship.damage(), 1);
    assert!(ship.register_hit());
    assert!(ship.is_sunk());
    // further hits do not grow the damage past the length
    assert!(!ship.register_hit());
    assert_eq!(ship.damage(), 2);
    Ok(())
}

#[test]
fn test_with_damage_bounds() -> Result<(), GameError> {
    let ship = Ship::new(3, 2, 2, Orientation::Vertical)?;
    assert!(ship.with_damage(3)?.is_sunk());
    assert!(ship.with_damage(4).is_err());
    Ok(())
}

#[test]
fn test_fleet_layouts() {
    assert_eq!(FleetLayout::Standard.lengths().collect::<Vec<_>>(), vec![5, 4, 3, 3, 2]);
    assert_eq!(FleetLayout::Classic.lengths().collect::<Vec<_>>(), vec![5, 4, 3, 2]);
    assert_eq!(FleetLayout::Standard.total_cells(), 17);
    assert_eq!(FleetLayout::Classic.total_cells(), 14);
    assert_eq!(FleetLayout::from_lengths(&[2, 3, 3, 4, 5]), Some(FleetLayout::Standard));
    assert_eq!(FleetLayout::from_lengths(&[3, 2, 4, 5]), Some(FleetLayout::Classic));
    assert_eq!(FleetLayout::from_lengths(&[5, 5, 3, 2]), None);
    assert_eq!(FleetLayout::from_lengths(&[9]), None);
}
