//! Front panel lane to hardware port mapping.

/// Number of logical ports on the reference board, management ports included.
pub const MOONSTONE_MAX_PORTS: usize = 514;

/// Lane map of the reference board.
///
/// Entry `lport - 1` is the 1-based hardware port whose status drives logical
/// port `lport`. Within every 64-lane block the front panel cages are wired
/// out of order (lanes 9..=24 and 41..=56 are rotated), and the two
/// management ports at the tail are swapped.
pub const MOONSTONE_PORT_MAP: [u16; MOONSTONE_MAX_PORTS] = [
    1, 2, 3, 4, 5, 6, 7, 8, 17, 18, 19, 20, 21, 22, 23, 24,
    25, 26, 27, 28, 29, 30, 31, 32, 9, 10, 11, 12, 13, 14, 15, 16,
    33, 34, 35, 36, 37, 38, 39, 40, 49, 50, 51, 52, 53, 54, 55, 56,
    57, 58, 59, 60, 61, 62, 63, 64, 41, 42, 43, 44, 45, 46, 47, 48,
    65, 66, 67, 68, 69, 70, 71, 72, 81, 82, 83, 84, 85, 86, 87, 88,
    89, 90, 91, 92, 93, 94, 95, 96, 73, 74, 75, 76, 77, 78, 79, 80,
    97, 98, 99, 100, 101, 102, 103, 104, 113, 114, 115, 116, 117, 118, 119, 120,
    121, 122, 123, 124, 125, 126, 127, 128, 105, 106, 107, 108, 109, 110, 111, 112,
    129, 130, 131, 132, 133, 134, 135, 136, 145, 146, 147, 148, 149, 150, 151, 152,
    153, 154, 155, 156, 157, 158, 159, 160, 137, 138, 139, 140, 141, 142, 143, 144,
    161, 162, 163, 164, 165, 166, 167, 168, 177, 178, 179, 180, 181, 182, 183, 184,
    185, 186, 187, 188, 189, 190, 191, 192, 169, 170, 171, 172, 173, 174, 175, 176,
    193, 194, 195, 196, 197, 198, 199, 200, 209, 210, 211, 212, 213, 214, 215, 216,
    217, 218, 219, 220, 221, 222, 223, 224, 201, 202, 203, 204, 205, 206, 207, 208,
    225, 226, 227, 228, 229, 230, 231, 232, 241, 242, 243, 244, 245, 246, 247, 248,
    249, 250, 251, 252, 253, 254, 255, 256, 233, 234, 235, 236, 237, 238, 239, 240,
    257, 258, 259, 260, 261, 262, 263, 264, 273, 274, 275, 276, 277, 278, 279, 280,
    281, 282, 283, 284, 285, 286, 287, 288, 265, 266, 267, 268, 269, 270, 271, 272,
    289, 290, 291, 292, 293, 294, 295, 296, 305, 306, 307, 308, 309, 310, 311, 312,
    313, 314, 315, 316, 317, 318, 319, 320, 297, 298, 299, 300, 301, 302, 303, 304,
    321, 322, 323, 324, 325, 326, 327, 328, 337, 338, 339, 340, 341, 342, 343, 344,
    345, 346, 347, 348, 349, 350, 351, 352, 329, 330, 331, 332, 333, 334, 335, 336,
    353, 354, 355, 356, 357, 358, 359, 360, 369, 370, 371, 372, 373, 374, 375, 376,
    377, 378, 379, 380, 381, 382, 383, 384, 361, 362, 363, 364, 365, 366, 367, 368,
    385, 386, 387, 388, 389, 390, 391, 392, 401, 402, 403, 404, 405, 406, 407, 408,
    409, 410, 411, 412, 413, 414, 415, 416, 393, 394, 395, 396, 397, 398, 399, 400,
    417, 418, 419, 420, 421, 422, 423, 424, 433, 434, 435, 436, 437, 438, 439, 440,
    441, 442, 443, 444, 445, 446, 447, 448, 425, 426, 427, 428, 429, 430, 431, 432,
    449, 450, 451, 452, 453, 454, 455, 456, 465, 466, 467, 468, 469, 470, 471, 472,
    473, 474, 475, 476, 477, 478, 479, 480, 457, 458, 459, 460, 461, 462, 463, 464,
    481, 482, 483, 484, 485, 486, 487, 488, 497, 498, 499, 500, 501, 502, 503, 504,
    505, 506, 507, 508, 509, 510, 511, 512, 489, 490, 491, 492, 493, 494, 495, 496,
    516, 515,
];

/// Borrowed lane map, indexed by 1-based logical port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMap<'a> {
    entries: &'a [u16],
}

impl<'a> PortMap<'a> {
    /// Wraps a table of 1-based hardware port numbers.
    pub const fn new(entries: &'a [u16]) -> Self {
        Self { entries }
    }

    /// The reference board's map.
    pub const fn moonstone() -> PortMap<'static> {
        PortMap::new(&MOONSTONE_PORT_MAP)
    }

    /// Number of logical ports the table describes.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw table entries.
    #[inline]
    pub fn entries(&self) -> &'a [u16] {
        self.entries
    }

    /// Returns the 0-based hardware row for a 1-based logical port.
    ///
    /// Returns `None` for port 0, ports past the end of the table, and
    /// zero entries.
    pub fn hw_port(&self, lport: u16) -> Option<u16> {
        let index = usize::from(lport).checked_sub(1)?;
        self.entries.get(index)?.checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_block_rotates_middle_lanes() {
        let map = PortMap::moonstone();
        assert_eq!(map.hw_port(1), Some(0));
        assert_eq!(map.hw_port(8), Some(7));
        assert_eq!(map.hw_port(9), Some(16));
        assert_eq!(map.hw_port(25), Some(8));
        assert_eq!(map.hw_port(41), Some(48));
        assert_eq!(map.hw_port(57), Some(40));
        assert_eq!(map.hw_port(65), Some(64));
    }

    #[test]
    fn management_ports_are_swapped() {
        let map = PortMap::moonstone();
        assert_eq!(map.hw_port(513), Some(515));
        assert_eq!(map.hw_port(514), Some(514));
    }

    #[test]
    fn out_of_range_ports_have_no_mapping() {
        let map = PortMap::moonstone();
        assert_eq!(map.hw_port(0), None);
        assert_eq!(map.hw_port(515), None);
        assert_eq!(PortMap::new(&[0]).hw_port(1), None);
    }

    #[test]
    fn every_hardware_port_is_used_once() {
        let mut seen = [false; 517];
        for &entry in MOONSTONE_PORT_MAP.iter() {
            let slot = &mut seen[usize::from(entry)];
            assert!(!*slot, "hardware port {} mapped twice", entry);
            *slot = true;
        }
    }
}
