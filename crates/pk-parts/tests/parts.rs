use approx::assert_relative_eq;
use glam::DVec3;
use pk_kernel::{BspKernel, CsgKernel, Solid, TessellatedMesh};
use pk_parts::{
    AUTO, ClaspParams, EdgeAxis, EdgeSpec, FastenerSpec, FilletCubeParams, HexBoltParams,
    HingeParams, Perforation, ScaffoldParams, ThreadParams, WedgeTrimParams, clasp, fillet_cube,
    polycube_between, support_scaffold, wedge_trim, wrench_width,
};

fn mesh_volume(mesh: &TessellatedMesh) -> f64 {
    mesh.indices
        .chunks_exact(3)
        .map(|t| {
            let p = |i: u32| {
                let v = mesh.vertices[i as usize];
                DVec3::new(v[0] as f64, v[1] as f64, v[2] as f64)
            };
            p(t[0]).dot(p(t[1]).cross(p(t[2])))
        })
        .sum::<f64>()
        / 6.0
}

fn render(solid: &Solid) -> TessellatedMesh {
    BspKernel::new().render(solid).unwrap()
}

#[test]
fn m8_wrench_width_is_twelve() {
    assert_relative_eq!(wrench_width(8.0, AUTO), 12.0);
    let spec = FastenerSpec::for_bolt(&HexBoltParams::default());
    assert_relative_eq!(spec.wrench_width, 12.0);
}

#[test]
fn frustum_polycube_renders() {
    let bottom = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(4.0, 0.0, 0.0),
        DVec3::new(4.0, 4.0, 0.0),
        DVec3::new(0.0, 4.0, 0.0),
    ];
    let top = [
        DVec3::new(1.0, 1.0, 3.0),
        DVec3::new(3.0, 1.0, 3.0),
        DVec3::new(3.0, 3.0, 3.0),
        DVec3::new(1.0, 3.0, 3.0),
    ];
    let mesh = render(&polycube_between(bottom, top));
    assert_relative_eq!(mesh_volume(&mesh), 28.0, epsilon = 1e-3);
}

#[test]
fn wedge_trim_chamfers_cube_edge() {
    let params = WedgeTrimParams {
        edge: EdgeSpec {
            origin: DVec3::ZERO,
            axis: EdgeAxis::X,
            quadrant: 0,
        },
        length: 10.0,
        run: 2.0,
        rise: 2.0,
    };
    let mesh = render(&wedge_trim(Solid::cube(10.0), &params));
    assert_relative_eq!(mesh_volume(&mesh), 1000.0 - 20.0, epsilon = 1e-2);
}

#[test]
fn scaffold_plates_render() {
    let mesh = render(&support_scaffold(&ScaffoldParams::default()));
    assert_relative_eq!(mesh_volume(&mesh), 7.0 * 0.6 * 10.0 * 10.0, epsilon = 1e-2);
}

#[test]
fn fillet_cube_loses_only_edges() {
    let params = FilletCubeParams {
        resolution: 16,
        ..FilletCubeParams::default()
    };
    let volume = mesh_volume(&render(&fillet_cube(&params)));
    assert!(volume > 3700.0 && volume < 4000.0, "volume {}", volume);
}

#[test]
fn clasp_hook_volume() {
    let parts = clasp(&ClaspParams::default());
    let volume = mesh_volume(&render(&parts.hook));
    // base + arm above it + the part of the tip outside the arm
    let tip = 0.5 * 1.0 * (2.0 / 1.01) * 8.0;
    assert_relative_eq!(volume, 41.6 + 192.0 + tip, epsilon = 1e-2);
}

#[test]
fn params_round_trip_through_ron() {
    let thread = ThreadParams {
        lead_top: true,
        truncation: 0.3,
        ..ThreadParams::default()
    };
    let text = ron::to_string(&thread).unwrap();
    assert_eq!(ron::from_str::<ThreadParams>(&text).unwrap(), thread);

    let scaffold = ScaffoldParams {
        perforation: Some(Perforation {
            hole_diameter: 1.5,
            hole_spacing: 3.0,
        }),
        cross_bracing: true,
        ..ScaffoldParams::default()
    };
    let text = ron::to_string(&scaffold).unwrap();
    assert_eq!(ron::from_str::<ScaffoldParams>(&text).unwrap(), scaffold);

    let trim = WedgeTrimParams {
        edge: EdgeSpec {
            origin: DVec3::new(1.0, 2.0, 3.0),
            axis: EdgeAxis::Z,
            quadrant: 3,
        },
        ..WedgeTrimParams::default()
    };
    let text = ron::to_string(&trim).unwrap();
    assert_eq!(ron::from_str::<WedgeTrimParams>(&text).unwrap(), trim);
}

#[test]
fn partial_ron_keeps_defaults() {
    let hinge: HingeParams = ron::from_str("(length: 40.0, knuckles: 7)").unwrap();
    assert_relative_eq!(hinge.length, 40.0);
    assert_eq!(hinge.knuckles, 7);
    assert_eq!(hinge.pin_diameter, HingeParams::default().pin_diameter);

    let thread: ThreadParams = ron::from_str("(diameter: 5.0, pitch: 0.8)").unwrap();
    assert_eq!(thread.truncation, AUTO);
    assert_eq!(thread.segments_per_turn, 50);
}
