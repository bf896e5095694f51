#![no_main]

use glam::Vec3;
use libfuzzer_sys::fuzz_target;
use rhizome_waypath_path::{Path, PathConfig, PathwayType, expected_segment_count};

fuzz_target!(|data: &[u8]| {
    // Any sequence of edits must keep segmentation consistent and queries panic-free.
    let Some((&head, ops)) = data.split_first() else {
        return;
    };
    let pathway = PathwayType::ALL[head as usize % 4];
    let mut path = Path::new(PathConfig::default().with_pathway(pathway));

    for op in ops.chunks(4) {
        let [kind, a, b, c] = [0, 1, 2, 3].map(|i| op.get(i).copied().unwrap_or(0));
        let point = Vec3::new(a as f32, b as f32, c as f32) - 128.0;
        match kind % 5 {
            0 => path.add_point(point, true),
            1 => {
                let _ = path.insert_point(point, a as usize, true);
            }
            2 => {
                let _ = path.remove_point(a as usize, true);
            }
            3 => {
                let _ = path.point_at(a as f32 / 255.0);
            }
            _ => {
                let _ = path.subdivided_points(b as usize);
            }
        }
        assert_eq!(
            path.segment_count(),
            expected_segment_count(pathway, path.len())
        );
        if !path.is_empty() {
            assert!(path.segment_index_for_ratio(c as f32 / 255.0).is_ok());
        }
    }
});
