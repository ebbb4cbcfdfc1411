use approx::assert_relative_eq;
use pk_kernel::Solid;
use pk_parts::thread::PITCH_SPACE;
use pk_parts::{NutCoreParams, ThreadParams, effective_radius, generate_thread, thread_segment};

fn m10_scenario() -> ThreadParams {
    ThreadParams {
        diameter: 10.0,
        pitch: 1.5,
        length: 25.0,
        segments_per_turn: 50,
        diameter_adjust: -0.4,
        truncation: 0.3,
        fill: 0.3,
        lead_top: true,
        lead_bottom: false,
        chamfer_top: true,
        chamfer_bottom: false,
        ..ThreadParams::default()
    }
}

#[test]
fn m10_scenario_is_one_piece() {
    let params = m10_scenario();
    assert_eq!(params.step_count(), 784);

    let mesh = generate_thread(&params);
    assert_eq!(mesh.step_count(), 784);
    assert_eq!(mesh.slices().len(), 785);
    assert!(!mesh.is_empty());
    assert_eq!(mesh.polyhedron().connected_components(), 1);

    let report = mesh.polyhedron().edge_report();
    assert!(report.is_watertight(), "{}", report);

    assert!(!thread_segment(&params).is_empty());
}

#[test]
fn threads_without_lead_are_watertight() {
    for (diameter, pitch, length, segments) in [
        (3.0, 0.5, 4.0, 16),
        (8.0, 1.25, 10.0, 50),
        (12.0, 1.75, 7.0, 36),
    ] {
        let params = ThreadParams {
            segments_per_turn: segments,
            ..ThreadParams::screw(diameter, pitch, length)
        };
        let polyhedron = generate_thread(&params).into_polyhedron();
        let report = polyhedron.edge_report();
        assert!(report.is_watertight(), "M{}: {}", diameter, report);
        assert!(polyhedron.signed_volume() > 0.0);
    }
}

#[test]
fn whole_pitch_lengths_end_at_length() {
    for k in 2..6 {
        let params = ThreadParams {
            segments_per_turn: 24,
            ..ThreadParams::screw(6.0, 1.0, k as f64)
        };
        let mesh = generate_thread(&params);
        assert_eq!(mesh.step_count(), (k - 1) * 24);

        let top = mesh
            .polyhedron()
            .vertices
            .iter()
            .map(|v| v.z)
            .fold(f64::MIN, f64::max);
        assert!(top <= k as f64 + 1e-9);
        let (_, end) = mesh.axial_extent().unwrap();
        assert_relative_eq!(end, k as f64, epsilon = 1e-9);
    }
}

#[test]
fn lead_in_ramps_from_base_radius() {
    let params = ThreadParams {
        lead_bottom: true,
        ..ThreadParams::default()
    };
    let mesh = generate_thread(&params);
    let profile = *mesh.profile();
    let span = params.end_segment_count();
    assert_eq!(span, 16);

    let radii: Vec<f64> = mesh.slices()[..=span]
        .iter()
        .map(|s| s.outer_radius())
        .collect();
    assert_relative_eq!(radii[0], profile.inner_radius, epsilon = 1e-9);
    assert_relative_eq!(radii[span], profile.outer_radius, epsilon = 1e-9);
    for pair in radii.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    for (i, radius) in radii.iter().enumerate() {
        assert_relative_eq!(
            *radius,
            effective_radius(i, profile.inner_radius, &params),
            epsilon = 1e-9
        );
    }
}

#[test]
fn generation_is_deterministic() {
    let params = m10_scenario();
    assert_eq!(generate_thread(&params), generate_thread(&params));
    assert_eq!(thread_segment(&params), thread_segment(&params));
}

#[test]
fn nut_bore_clears_default_screw() {
    let screw = ThreadParams::default().profile();
    let bore = NutCoreParams::default().bore_thread().profile();

    // Sample every radius the screw occupies; the bore must be wider there.
    let mut radius = screw.inner_radius - 0.5;
    while radius <= screw.outer_radius {
        if radius <= screw.core_radius {
            assert!(radius < bore.core_radius, "screw core touches nut at {}", radius);
        } else {
            let flank = screw.half_width_at(radius);
            let void = bore
                .material_half_width(radius)
                .unwrap_or_else(|| panic!("screw crest outside bore at {}", radius));
            assert!(void > flank, "no clearance at {}: {} <= {}", radius, void, flank);
        }
        radius += 0.01;
    }
    assert!(screw.outer_radius < bore.outer_radius);
}

#[test]
fn volume_grows_linearly_with_length() {
    let volume = |length: f64| {
        let params = ThreadParams {
            segments_per_turn: 10,
            ..ThreadParams::screw(6.0, 1.0, length)
        };
        generate_thread(&params).polyhedron().signed_volume()
    };
    let (short, mid, long) = (volume(5.0), volume(9.0), volume(13.0));
    assert_relative_eq!(mid - short, long - mid, max_relative = 1e-6);
}

#[test]
fn ridges_never_touch_next_turn() {
    let params = m10_scenario();
    let limit = (params.pitch - PITCH_SPACE) / 2.0;
    for slice in generate_thread(&params).slices() {
        assert!((slice.inner_upper.z - slice.inner_lower.z) / 2.0 <= limit + 1e-12);
        assert!((slice.outer_upper.z - slice.outer_lower.z) / 2.0 <= limit + 1e-12);
    }
}

#[test]
fn short_thread_is_empty() {
    let params = ThreadParams::screw(8.0, 1.25, 1.0);
    assert!(generate_thread(&params).is_empty());
    assert_eq!(thread_segment(&params), Solid::Empty);
}
