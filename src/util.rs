/// Returns the index of the first element of the 128-bit lane containing element `i`.
pub const fn lane_base(i: usize, per_lane: usize) -> u32 {
    (i & !(per_lane - 1)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_bases() {
        assert_eq!(lane_base(0, 16), 0);
        assert_eq!(lane_base(15, 16), 0);
        assert_eq!(lane_base(17, 16), 16);
        assert_eq!(lane_base(5, 4), 4);
        assert_eq!(lane_base(7, 2), 6);
    }
}
