// Tableau layout
// Fixed regions of `img/tableau_1.png` (1152x648) with their point values.
use super::Tile;

/// `(x, y, width, height, points)` per region, in draw order.
pub const TABLEAU_LAYOUT: [(f64, f64, f64, f64, u32); 22] = [
    (0.0, 0.0, 301.0, 233.0, 2),
    (306.0, 0.0, 185.0, 157.0, 4),
    (496.0, 0.0, 303.0, 71.0, 5),
    (804.0, 0.0, 272.0, 157.0, 3),
    (1081.0, 0.0, 71.0, 71.0, 10),
    (496.0, 76.0, 303.0, 81.0, 5),
    (306.0, 162.0, 292.0, 71.0, 5),
    (603.0, 162.0, 382.0, 351.0, 1),
    (990.0, 162.0, 86.0, 351.0, 4),
    (1081.0, 76.0, 71.0, 437.0, 4),
    (0.0, 238.0, 108.0, 258.0, 4),
    (113.0, 238.0, 41.0, 410.0, 8),
    (159.0, 238.0, 261.0, 143.0, 3),
    (425.0, 238.0, 173.0, 143.0, 6),
    (159.0, 386.0, 172.0, 110.0, 7),
    (336.0, 386.0, 262.0, 203.0, 2),
    (0.0, 501.0, 108.0, 147.0, 7),
    (159.0, 501.0, 172.0, 147.0, 5),
    (336.0, 594.0, 475.0, 54.0, 5),
    (603.0, 518.0, 320.0, 71.0, 6),
    (816.0, 594.0, 107.0, 54.0, 10),
    (928.0, 518.0, 224.0, 130.0, 4),
];

pub fn tableau_tiles() -> Vec<Tile> {
    TABLEAU_LAYOUT
        .iter()
        .map(|&(x, y, w, h, points)| Tile::new(x, y, w, h).with_points(points))
        .collect()
}
