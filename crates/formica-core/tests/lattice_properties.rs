//! Structural properties of factory-built lattices.
//!
//! Every grid shape from 1x1 up to 7x6 is checked for:
//! 1. Cell count and unique identifiers
//! 2. Symmetric adjacency
//! 3. Missing directions exactly on the borders
//! 4. Neighbours sitting at the offset their direction names

use formica_core::prelude::*;
use std::collections::HashSet;

fn shapes() -> impl Iterator<Item = (i64, i64)> {
    (1..=7).flat_map(|w| (1..=6).map(move |h| (w, h)))
}

#[test]
fn every_shape_has_width_times_height_unique_cells() {
    for (w, h) in shapes() {
        let grid = create_nest_grid("nest", w, h).unwrap();
        assert_eq!(grid.len(), (w * h) as usize);
        assert_eq!(grid.width(), w as usize);
        assert_eq!(grid.height(), h as usize);

        let names: HashSet<_> = grid.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), grid.len(), "duplicate ids in {w}x{h}");
    }
}

#[test]
fn adjacency_is_symmetric() {
    for (w, h) in shapes() {
        let grid = create_pheromone_grid(w, h).unwrap();
        grid.verify_symmetry().unwrap();

        for cell in grid.iter() {
            for (dir, other) in cell.neighbors() {
                let back = grid.cell(other).unwrap().neighbor(dir.opposite());
                assert_eq!(back, Some(cell.handle()), "{} {dir} in {w}x{h}", cell.name());
            }
        }
    }
}

#[test]
fn neighbours_sit_at_their_direction_offset() {
    let grid = create_nest_grid("nest", 5, 4).unwrap();
    for cell in grid.iter() {
        let (row, col) = grid.position_of(cell.handle()).unwrap();
        for dir in Direction::ALL {
            let (dr, dc) = dir.offset();
            let r = row as i64 + dr;
            let c = col as i64 + dc;
            let inside = r >= 0 && c >= 0 && r < 4 && c < 5;
            let expected = inside.then(|| grid.id_at(r as usize, c as usize).unwrap());
            assert_eq!(cell.neighbor(dir), expected, "{} {dir}", cell.name());
        }
    }
}

#[test]
fn borders_lack_outward_directions() {
    let (w, h) = (6usize, 5usize);
    let grid = create_nest_grid("nest", w as i64, h as i64).unwrap();

    for cell in grid.iter() {
        let (row, col) = grid.position_of(cell.handle()).unwrap();
        if row == 0 {
            for dir in [Direction::North, Direction::NorthWest, Direction::NorthEast] {
                assert!(cell.neighbor(dir).is_none());
            }
        }
        if col == 0 {
            for dir in [Direction::West, Direction::NorthWest, Direction::SouthWest] {
                assert!(cell.neighbor(dir).is_none());
            }
        }
        if col == w - 1 {
            for dir in [Direction::East, Direction::NorthEast, Direction::SouthEast] {
                assert!(cell.neighbor(dir).is_none());
            }
        }
        if row == h - 1 {
            for dir in [Direction::South, Direction::SouthWest, Direction::SouthEast] {
                assert!(cell.neighbor(dir).is_none());
            }
        }
        if !grid.is_border(cell.handle()) {
            assert_eq!(cell.neighbor_count(), 8);
        }
    }
}

#[test]
fn link_count_matches_moore_lattice() {
    for (w, h) in shapes() {
        let grid = create_nest_grid("nest", w, h).unwrap();
        // horizontal + vertical + two diagonal families
        let expected = h * (w - 1) + w * (h - 1) + 2 * (w - 1) * (h - 1);
        assert_eq!(grid.link_count(), expected as usize, "{w}x{h}");
    }
}

#[test]
fn three_by_two_pheromone_grid() {
    let grid = create_pheromone_grid(3, 2).unwrap();
    assert_eq!(grid.len(), 6);

    let corner = grid.get(0, 0).unwrap();
    let dirs: HashSet<_> = corner.neighbors().map(|(d, _)| d).collect();
    assert_eq!(
        dirs,
        HashSet::from([Direction::South, Direction::East, Direction::SouthEast])
    );

    let top_middle = grid.get(0, 1).unwrap();
    let dirs: HashSet<_> = top_middle.neighbors().map(|(d, _)| d).collect();
    assert_eq!(
        dirs,
        HashSet::from([
            Direction::West,
            Direction::East,
            Direction::SouthWest,
            Direction::South,
            Direction::SouthEast,
        ])
    );

    let bottom_middle = grid.get(1, 1).unwrap();
    assert_eq!(bottom_middle.neighbor_count(), 5);
    assert_eq!(
        grid.neighbor_of(bottom_middle.handle(), Direction::NorthEast)
            .map(|c| c.name()),
        Some("n-0,2")
    );
}

#[test]
fn interior_cell_has_all_eight_neighbours() {
    let grid = create_pheromone_grid(3, 3).unwrap();
    let centre = grid.get(1, 1).unwrap();
    assert_eq!(centre.neighbor_count(), 8);
    assert!(!grid.is_border(centre.handle()));
}

#[test]
fn lookup_by_name() {
    let grid = create_food_source_grid("berries", 4, 3, 12.0).unwrap();
    let cell = grid.find_by_name("berries-2,3").unwrap();
    assert_eq!(grid.position_of(cell.handle()), Some((2, 3)));
    assert!(grid.find_by_name("berries-3,0").is_none());
}

#[test]
fn lattice_serializes_with_names_and_payloads() {
    let grid = create_food_source_grid("seed", 2, 1, 4.0).unwrap();
    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(json["width"], 2);
    assert_eq!(json["cells"][1]["name"], "seed-0,1");
    assert_eq!(json["cells"][1]["payload"]["remaining"], 2.0);
}
