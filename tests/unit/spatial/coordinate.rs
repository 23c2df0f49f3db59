//! Tests for coordinates, directions and neighbor enumeration

#[cfg(test)]
mod tests {
    use cellmaze::spatial::{Coordinate, Direction};

    // Tests neighbors are listed east, north, west, south
    // Verified by swapping the west and south entries
    #[test]
    fn test_neighbors4_order() {
        let center = Coordinate::new(3, 7);
        assert_eq!(
            center.neighbors4(),
            [
                Coordinate::new(4, 7),
                Coordinate::new(3, 8),
                Coordinate::new(2, 7),
                Coordinate::new(3, 6),
            ]
        );
    }

    // Tests neighbors of the origin step into negative coordinates instead of wrapping
    #[test]
    fn test_neighbors_of_origin_go_negative() {
        let neighbors = Coordinate::new(0, 0).neighbors4();
        assert!(neighbors.contains(&Coordinate::new(-1, 0)));
        assert!(neighbors.contains(&Coordinate::new(0, -1)));
    }

    // Tests direction_to recognizes only 4-adjacent cells
    // Verified by accepting diagonal neighbors
    // Tests neighbors at the i32 limits wrap instead of overflowing
    // Verified by using plain addition in step
    #[test]
    fn test_neighbors_wrap_at_limits() {
        let edge = Coordinate::new(i32::MAX, i32::MIN);
        let [east, north, west, south] = edge.neighbors4();
        assert_eq!(east.x, i32::MIN);
        assert_eq!(west.x, i32::MAX - 1);
        assert_ne!(north.y, south.y);
        assert!([north.y, south.y].contains(&i32::MAX));
    }

    #[test]
    fn test_direction_to() {
        let origin = Coordinate::new(2, 2);
        assert_eq!(origin.direction_to(Coordinate::new(3, 2)), Some(Direction::East));
        assert_eq!(origin.direction_to(Coordinate::new(2, 1)), Some(Direction::South));
        assert_eq!(origin.direction_to(Coordinate::new(3, 3)), None);
        assert_eq!(origin.direction_to(origin), None);
    }

    // Tests every direction's opposite undoes its offset
    #[test]
    fn test_opposite_round_trip() {
        let start = Coordinate::new(-4, 9);
        for direction in Direction::ALL {
            assert_eq!(start.step(direction).step(direction.opposite()), start);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    // Tests the Add impls agree with step
    #[test]
    fn test_add_operators() {
        let a = Coordinate::new(1, 2);
        assert_eq!(a + Coordinate::new(3, -5), Coordinate::new(4, -3));
        assert_eq!(a + Direction::North, a.step(Direction::North));
    }

    #[test]
    fn test_manhattan_and_display() {
        let a = Coordinate::from((1, -2));
        let b = Coordinate::new(-3, 4);
        assert_eq!(a.manhattan(b), 10);
        assert_eq!(b.manhattan(a), 10);
        assert_eq!(a.to_string(), "(1, -2)");
    }
}
