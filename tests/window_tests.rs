use rand::Rng;
use volumic::ops::{
    crop, crop_left, crop_right, pad_zeros, sparse_explode, sparse_explode_ref,
    sparse_implode, sparse_implode_ref,
};
use volumic::{Vec3i, Volume, VolumeError};

/// Volume whose value at (x, y, z) is its own flat offset.
fn iota(shape: Vec3i) -> Volume<f32> {
    let n = shape.num_elements();
    Volume::from_vec(shape, (0..n).map(|i| i as f32).collect())
}

#[test]
fn test_crop_left_takes_origin_corner() {
    let v = iota(Vec3i::new(4, 4, 4));
    let c = crop_left(&v, Vec3i::new(2, 3, 2)).unwrap();
    assert_eq!(c.shape(), Vec3i::new(2, 3, 2));
    for z in 0..2 {
        for y in 0..3 {
            for x in 0..2 {
                assert_eq!(c.at(x, y, z), v.at(x, y, z));
            }
        }
    }
}

#[test]
fn test_crop_right_takes_high_corner() {
    let v = iota(Vec3i::new(5, 5, 5));
    let c = crop_right(&v, Vec3i::new(2, 2, 2)).unwrap();
    // Selects indices [3, 4] on every axis.
    for z in 0..2 {
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(c.at(x, y, z), v.at(x + 3, y + 3, z + 3));
            }
        }
    }
}

#[test]
fn test_crop_full_shape_is_identity() {
    let v = iota(Vec3i::new(3, 2, 4));
    let c = crop(&v, v.shape()).unwrap();
    assert_eq!(*c, v);
    let r = crop_right(&v, v.shape()).unwrap();
    assert_eq!(*r, v);
}

#[test]
fn test_crop_oversized_window_fails() {
    let v = iota(Vec3i::new(3, 3, 3));
    assert!(matches!(
        crop(&v, Vec3i::new(4, 2, 2)),
        Err(VolumeError::OutOfBounds { .. })
    ));
    assert!(matches!(
        crop_right(&v, Vec3i::new(2, 2, 5)),
        Err(VolumeError::OutOfBounds { .. })
    ));
}

#[test]
fn test_pad_zeros_embeds_at_origin() {
    let v = iota(Vec3i::new(2, 2, 2));
    let p = pad_zeros(&v, Vec3i::new(4, 3, 3)).unwrap();
    assert_eq!(p.shape(), Vec3i::new(4, 3, 3));
    for z in 0..3 {
        for y in 0..3 {
            for x in 0..4 {
                let expected = if x < 2 && y < 2 && z < 2 { v.at(x, y, z) } else { 0.0 };
                assert_eq!(p.at(x, y, z), expected);
            }
        }
    }
}

#[test]
fn test_pad_zeros_equal_shape_is_copy() {
    let v = iota(Vec3i::new(3, 3, 2));
    let p = pad_zeros(&v, v.shape()).unwrap();
    assert_eq!(*p, v);
}

#[test]
fn test_pad_zeros_shrinking_fails() {
    let v = iota(Vec3i::new(3, 3, 3));
    assert!(matches!(
        pad_zeros(&v, Vec3i::new(3, 2, 3)),
        Err(VolumeError::OutOfBounds { .. })
    ));
}

#[test]
fn test_crop_then_pad_restores_window() {
    let v = iota(Vec3i::new(4, 4, 4));
    let s = Vec3i::new(2, 3, 2);
    let c = crop_left(&v, s).unwrap();
    let p = pad_zeros(&c, v.shape()).unwrap();
    for z in 0..4 {
        for y in 0..4 {
            for x in 0..4 {
                let expected = if x < s.x && y < s.y && z < s.z { v.at(x, y, z) } else { 0.0 };
                assert_eq!(p.at(x, y, z), expected);
            }
        }
    }
}

#[test]
fn test_sparse_explode_concrete_scenario() {
    // 2x2x2 of 1..8, stride (2,1,1) into (4,2,2): originals at even x,
    // zeros at odd x, y/z positions unchanged.
    let v = Volume::from_vec(Vec3i::new(2, 2, 2), (1..=8).map(|i| i as f32).collect());
    let sparse = Vec3i::new(2, 1, 1);
    let e = sparse_explode(&v, sparse, Vec3i::new(4, 2, 2)).unwrap();
    for z in 0..2 {
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(e.at(2 * x, y, z), v.at(x, y, z));
                assert_eq!(e.at(2 * x + 1, y, z), 0.0);
            }
        }
    }
    assert_eq!(
        e.data(),
        &[1.0, 0.0, 2.0, 0.0, 3.0, 0.0, 4.0, 0.0, 5.0, 0.0, 6.0, 0.0, 7.0, 0.0, 8.0, 0.0]
    );

    let back = sparse_implode(&e, sparse, v.shape()).unwrap();
    assert_eq!(back.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
}

#[test]
fn test_explode_untouched_region_stays_zero() {
    // Target larger than the exploded prefix: the slack stays zero.
    let v = Volume::from_vec(Vec3i::new(1, 1, 1), vec![9.0f32]);
    let e = sparse_explode(&v, Vec3i::new(2, 2, 2), Vec3i::new(3, 3, 3)).unwrap();
    let mut nonzero = 0;
    for &x in e.data() {
        if x != 0.0 {
            nonzero += 1;
        }
    }
    assert_eq!(nonzero, 1);
    assert_eq!(e.at(0, 0, 0), 9.0);
}

#[test]
fn test_explode_implode_identity_with_slack() {
    let v = iota(Vec3i::new(3, 2, 4));
    let sparse = Vec3i::new(2, 3, 1);
    let s = v.shape() * sparse + Vec3i::new(1, 0, 2);
    let e = sparse_explode(&v, sparse, s).unwrap();
    let back = sparse_implode(&e, sparse, v.shape()).unwrap();
    assert_eq!(*back, v);
}

#[test]
fn test_unit_stride_explode_is_pad_like_copy() {
    let v = iota(Vec3i::new(3, 3, 3));
    let e = sparse_explode(&v, Vec3i::ONE, v.shape()).unwrap();
    assert_eq!(*e, v);
    let i = sparse_implode(&v, Vec3i::ONE, v.shape()).unwrap();
    assert_eq!(*i, v);
}

#[test]
fn test_dilation_bounds_are_checked() {
    let v = iota(Vec3i::new(2, 2, 2));
    // 2 * 2 = 4 > 3 on x.
    assert!(matches!(
        sparse_explode(&v, Vec3i::new(2, 1, 1), Vec3i::new(3, 2, 2)),
        Err(VolumeError::OutOfBounds { .. })
    ));
    let r = iota(Vec3i::new(4, 4, 4));
    assert!(matches!(
        sparse_implode(&r, Vec3i::new(2, 2, 2), Vec3i::new(3, 2, 2)),
        Err(VolumeError::OutOfBounds { .. })
    ));
}

#[test]
fn test_dilation_rejects_non_positive_stride() {
    let v = iota(Vec3i::new(2, 2, 2));
    assert!(matches!(
        sparse_explode(&v, Vec3i::new(0, 1, 1), Vec3i::new(2, 2, 2)),
        Err(VolumeError::BadStride { .. })
    ));
    assert!(matches!(
        sparse_implode(&v, Vec3i::new(1, -2, 1), Vec3i::new(2, 1, 2)),
        Err(VolumeError::BadStride { .. })
    ));
}

#[test]
fn test_explode_forms_agree_on_random_inputs() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let vs = Vec3i::new(
            rng.random_range(1..=4),
            rng.random_range(1..=4),
            rng.random_range(1..=4),
        );
        let sparse = Vec3i::new(
            rng.random_range(1..=3),
            rng.random_range(1..=3),
            rng.random_range(1..=3),
        );
        let slack = Vec3i::new(
            rng.random_range(0..=2),
            rng.random_range(0..=2),
            rng.random_range(0..=2),
        );
        let s = vs * sparse + slack;
        let data: Vec<f32> = (0..vs.num_elements())
            .map(|_| rng.random_range(-1.0f32..1.0))
            .collect();
        let v = Volume::from_vec(vs, data);

        let fast = sparse_explode(&v, sparse, s).unwrap();
        let slow = sparse_explode_ref(&v, sparse, s).unwrap();
        assert_eq!(fast.shape(), slow.shape());
        assert_eq!(fast.data(), slow.data());

        let gathered = sparse_implode(&fast, sparse, vs).unwrap();
        let gathered_ref = sparse_implode_ref(&fast, sparse, vs).unwrap();
        assert_eq!(gathered.data(), gathered_ref.data());
        assert_eq!(gathered.data(), v.data());
    }
}

#[test]
fn test_windowing_generic_over_f64() {
    let n = 27;
    let v = Volume::from_vec(Vec3i::splat(3), (0..n).map(|i| i as f64).collect());
    let c = crop_right(&v, Vec3i::splat(2)).unwrap();
    assert_eq!(c.at(0, 0, 0), v.at(1, 1, 1));
    let p = pad_zeros(&v, Vec3i::splat(4)).unwrap();
    assert_eq!(p.at(3, 3, 3), 0.0);
}
