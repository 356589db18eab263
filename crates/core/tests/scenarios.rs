use std::collections::BTreeSet;

use mapbuilder::geometry::Rect;
use mapbuilder::map::{GenerationLimits, Room, RoomSizeLimits};
use mapbuilder::{MapInfo, Pos};

fn map_with_rooms(rooms: &[Rect]) -> MapInfo {
    let mut map = MapInfo::new();
    map.init(100, 100);
    map.set_seed(31);
    map.set_room_size_limits(RoomSizeLimits {
        min_width: 5,
        max_width: 15,
        min_height: 5,
        max_height: 15,
    });
    for &bounds in rooms {
        map.insert_room(Room::new(bounds));
    }
    map
}

#[test]
fn test_square_of_rooms_connects_with_one_loop() {
    let mut map = map_with_rooms(&[
        Rect::new(0, 0, 10, 10),
        Rect::new(20, 0, 10, 10),
        Rect::new(0, 20, 10, 10),
        Rect::new(20, 20, 10, 10),
    ]);

    let mut graph = map.perform_delaunay_triangulation().expect("four rooms triangulate");
    let total_edges = graph.remaining_edges();
    assert!((5..=6).contains(&total_edges), "unexpected edge count {total_edges}");

    let mut pairs = map.calc_min_span(&mut graph);
    assert_eq!(pairs.len(), 3);
    assert_eq!(graph.remaining_edges(), total_edges - 3);

    assert_eq!(map.add_random_edges(&mut graph, &mut pairs, 1), 1);
    assert_eq!(pairs.len(), 4);
    let distinct: BTreeSet<(usize, usize)> =
        pairs.iter().map(|pair| (pair.from.min(pair.to), pair.from.max(pair.to))).collect();
    assert_eq!(distinct.len(), 4, "random edge duplicated a spanning edge");

    let corridors = map.generate_corridors(&graph, &pairs);
    assert_eq!(corridors.len(), 4);
    let attached: usize = map.rooms().values().map(|room| room.corridors.len()).sum();
    assert_eq!(attached, 8);
}

#[test]
fn test_corridor_runs_between_facing_walls() {
    let mut map = map_with_rooms(&[Rect::new(0, 0, 10, 10), Rect::new(20, 0, 10, 10)]);
    let centers: Vec<Pos> = map.room_centers().into_iter().map(|(_, center)| center).collect();
    assert_eq!(centers, vec![Pos::new(5, 5), Pos::new(25, 5)]);

    let mut graph = map.perform_delaunay_triangulation().expect("two rooms triangulate");
    let pairs = map.calc_min_span(&mut graph);
    let created = map.generate_corridors(&graph, &pairs);

    assert_eq!(created.len(), 1);
    let corridor = map.corridors()[created[0]];
    let endpoints = [corridor.start, corridor.end];
    assert!(endpoints.contains(&Pos::new(10, 5)));
    assert!(endpoints.contains(&Pos::new(20, 5)));
}

#[test]
fn test_reduction_then_demotion_keeps_only_full_size_rooms() {
    let mut map = map_with_rooms(&[
        Rect::new(0, 0, 10, 10),
        Rect::new(20, 0, 3, 12),
        Rect::new(40, 0, 10, 10),
        Rect::new(60, 0, 10, 4),
        Rect::new(80, 0, 10, 10),
    ]);
    map.set_generation_limits(GenerationLimits { max_rooms: 2, max_random_corridors: 0 });

    let features = map.separate_corridor_features();
    assert_eq!(features.len(), 2);
    assert_eq!(map.room_count(), 3);

    let evicted = map.reduce_rooms();
    assert_eq!(evicted.len(), 1);
    assert!(evicted.iter().all(|room| !room.enabled));
    assert_eq!(map.room_count(), 2);
    assert!(map.rooms().values().all(|room| room.bounds.width >= 5 && room.bounds.height >= 5));
}
