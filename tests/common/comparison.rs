//! Geometry and entity-graph comparison utilities for tests.
//!
//! Provides tolerance-based f64/Vector3 assertions, per-entity-type value
//! comparison, and a graph walk that pairs entities of two files by the
//! references that lead to them.

#![allow(dead_code)]

use igesrust::entities::{Entity, EntityType};
use igesrust::types::{EntityId, Vector3};
use igesrust::IgesFile;
use std::collections::{HashMap, VecDeque};

/// Default tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-9;

// ===========================================================================
// Scalar & point assertions
// ===========================================================================

/// Check approximate equality of two f64 values within `tol`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

/// Assert two f64 values are approximately equal.
pub fn assert_f64_eq(a: f64, b: f64, tol: f64) {
    assert!(
        approx_eq(a, b, tol),
        "f64 mismatch: {a} vs {b} (delta={}, tol={tol})",
        (a - b).abs()
    );
}

/// Assert two Vector3 values are approximately equal component-wise.
pub fn assert_vec3_eq(a: &Vector3, b: &Vector3, tol: f64) {
    assert!(
        approx_eq(a.x, b.x, tol) && approx_eq(a.y, b.y, tol) && approx_eq(a.z, b.z, tol),
        "Vector3 mismatch: ({},{},{}) vs ({},{},{}) tol={tol}",
        a.x, a.y, a.z, b.x, b.y, b.z
    );
}

// ===========================================================================
// Diff-based comparison helpers
// ===========================================================================

/// Append a diff message if two f64 values differ beyond tolerance.
pub fn check_f64(diffs: &mut Vec<String>, name: &str, a: f64, b: f64) {
    if !approx_eq(a, b, TOL) {
        diffs.push(format!("{name}: {a} vs {b}"));
    }
}

/// Append a diff message if two Vector3 values differ beyond tolerance.
pub fn check_vec3(diffs: &mut Vec<String>, name: &str, a: &Vector3, b: &Vector3) {
    if !approx_eq(a.x, b.x, TOL) || !approx_eq(a.y, b.y, TOL) || !approx_eq(a.z, b.z, TOL) {
        diffs.push(format!(
            "{name}: ({},{},{}) vs ({},{},{})",
            a.x, a.y, a.z, b.x, b.y, b.z
        ));
    }
}

fn check_eq<T: PartialEq + std::fmt::Debug>(diffs: &mut Vec<String>, name: &str, a: T, b: T) {
    if a != b {
        diffs.push(format!("{name}: {a:?} vs {b:?}"));
    }
}

// ===========================================================================
// Per-entity-type value comparison
// ===========================================================================

/// Compare the non-pointer values of two entities. Returns a list of
/// mismatch descriptions; empty means the entities match.
pub fn compare_entity_values(a: &EntityType, b: &EntityType) -> Vec<String> {
    let mut diffs = Vec::new();
    let (ea, eb) = (a.as_entity(), b.as_entity());

    check_eq(&mut diffs, "type", ea.entity_type_number(), eb.entity_type_number());
    check_eq(&mut diffs, "form", ea.form_number(), eb.form_number());
    let (ca, cb) = (ea.common(), eb.common());
    check_eq(&mut diffs, "status", ca.status, cb.status);
    check_eq(&mut diffs, "line weight", ca.line_weight, cb.line_weight);
    check_eq(&mut diffs, "label", &ca.label, &cb.label);
    check_eq(&mut diffs, "subscript", ca.subscript, cb.subscript);

    match (a, b) {
        (EntityType::Line(la), EntityType::Line(lb)) => {
            check_vec3(&mut diffs, "p1", &la.p1, &lb.p1);
            check_vec3(&mut diffs, "p2", &la.p2, &lb.p2);
        }
        (EntityType::CircularArc(aa), EntityType::CircularArc(ab)) => {
            check_f64(&mut diffs, "plane", aa.plane_displacement, ab.plane_displacement);
            check_vec3(&mut diffs, "center", &aa.center, &ab.center);
            check_vec3(&mut diffs, "start", &aa.start, &ab.start);
            check_vec3(&mut diffs, "end", &aa.end, &ab.end);
        }
        (EntityType::Location(la), EntityType::Location(lb)) => {
            check_vec3(&mut diffs, "point", &la.point, &lb.point);
        }
        (EntityType::Direction(da), EntityType::Direction(db)) => {
            check_vec3(&mut diffs, "vector", &da.vector, &db.vector);
        }
        (EntityType::TransformationMatrix(ma), EntityType::TransformationMatrix(mb)) => {
            for (i, (x, y)) in ma
                .matrix
                .to_parameters()
                .iter()
                .zip(mb.matrix.to_parameters().iter())
                .enumerate()
            {
                check_f64(&mut diffs, &format!("matrix[{i}]"), *x, *y);
            }
        }
        (EntityType::Sphere(sa), EntityType::Sphere(sb)) => {
            check_f64(&mut diffs, "radius", sa.radius, sb.radius);
            check_vec3(&mut diffs, "center", &sa.center, &sb.center);
        }
        (EntityType::Torus(ta), EntityType::Torus(tb)) => {
            check_f64(&mut diffs, "ring radius", ta.ring_radius, tb.ring_radius);
            check_f64(&mut diffs, "disc radius", ta.disc_radius, tb.disc_radius);
            check_vec3(&mut diffs, "center", &ta.center, &tb.center);
            check_vec3(&mut diffs, "normal", &ta.normal, &tb.normal);
        }
        (EntityType::SubfigureDefinition(fa), EntityType::SubfigureDefinition(fb)) => {
            check_eq(&mut diffs, "depth", fa.depth, fb.depth);
            check_eq(&mut diffs, "name", &fa.name, &fb.name);
            check_eq(&mut diffs, "members", fa.entities.len(), fb.entities.len());
        }
        (EntityType::TextFontDefinition(fa), EntityType::TextFontDefinition(fb)) => {
            check_eq(&mut diffs, "font code", fa.font_code, fb.font_code);
            check_eq(&mut diffs, "name", &fa.name, &fb.name);
            check_eq(&mut diffs, "supersedes code", fa.supersedes_code, fb.supersedes_code);
            check_eq(&mut diffs, "scale", fa.scale, fb.scale);
            check_eq(&mut diffs, "characters", &fa.characters, &fb.characters);
        }
        (EntityType::TextDisplayTemplate(ta), EntityType::TextDisplayTemplate(tb)) => {
            check_f64(&mut diffs, "box width", ta.box_width, tb.box_width);
            check_f64(&mut diffs, "box height", ta.box_height, tb.box_height);
            check_eq(&mut diffs, "font code", ta.font_code, tb.font_code);
            check_f64(&mut diffs, "slant", ta.slant_angle, tb.slant_angle);
            check_f64(&mut diffs, "rotation angle", ta.rotation_angle, tb.rotation_angle);
            check_eq(&mut diffs, "mirror", ta.mirror_axis, tb.mirror_axis);
            check_eq(&mut diffs, "rotation", ta.rotation, tb.rotation);
            check_vec3(&mut diffs, "location", &ta.location, &tb.location);
        }
        (EntityType::ColorDefinition(ca), EntityType::ColorDefinition(cb)) => {
            check_f64(&mut diffs, "red", ca.red, cb.red);
            check_f64(&mut diffs, "green", ca.green, cb.green);
            check_f64(&mut diffs, "blue", ca.blue, cb.blue);
            check_eq(&mut diffs, "name", &ca.name, &cb.name);
        }
        (EntityType::LabelDisplayAssociativity(la), EntityType::LabelDisplayAssociativity(lb)) => {
            check_eq(&mut diffs, "placements", la.placements.len(), lb.placements.len());
            for (pa, pb) in la.placements.iter().zip(lb.placements.iter()) {
                check_vec3(&mut diffs, "placement location", &pa.location, &pb.location);
                check_eq(&mut diffs, "placement level", pa.level, pb.level);
            }
        }
        (EntityType::Unsupported(ua), EntityType::Unsupported(ub)) => {
            check_eq(&mut diffs, "fields", &ua.fields, &ub.fields);
        }
        (EntityType::Null(_), EntityType::Null(_)) => {}
        _ => diffs.push(format!(
            "variant: {} vs {}",
            ea.entity_type(),
            eb.entity_type()
        )),
    }
    diffs
}

// ===========================================================================
// Graph comparison
// ===========================================================================

/// Walk both files from their roots in lockstep, pairing entities through
/// the references that reach them. Returns mismatch descriptions; empty
/// means both files hold the same graph.
pub fn compare_graphs(a: &IgesFile, b: &IgesFile) -> Vec<String> {
    let mut diffs = Vec::new();
    if a.root_ids().len() != b.root_ids().len() {
        diffs.push(format!(
            "root count: {} vs {}",
            a.root_ids().len(),
            b.root_ids().len()
        ));
        return diffs;
    }

    let mut pairs: HashMap<EntityId, EntityId> = HashMap::new();
    let mut queue: VecDeque<(EntityId, EntityId)> = a
        .root_ids()
        .iter()
        .copied()
        .zip(b.root_ids().iter().copied())
        .collect();

    while let Some((ia, ib)) = queue.pop_front() {
        if let Some(&seen) = pairs.get(&ia) {
            if seen != ib {
                diffs.push(format!("{ia} pairs with both {seen} and {ib}"));
            }
            continue;
        }
        pairs.insert(ia, ib);

        let (Some(ea), Some(eb)) = (a.entity(ia), b.entity(ib)) else {
            diffs.push(format!("missing entity {ia} or {ib}"));
            continue;
        };
        for diff in compare_entity_values(ea, eb) {
            diffs.push(format!("{ia}/{ib} {diff}"));
        }

        let (ra, rb) = (ea.all_references(), eb.all_references());
        if ra.len() != rb.len() {
            diffs.push(format!("{ia}/{ib} reference count: {} vs {}", ra.len(), rb.len()));
            continue;
        }
        queue.extend(ra.into_iter().zip(rb));
    }
    diffs
}

/// Assert two files hold the same entity graph.
pub fn assert_same_graph(a: &IgesFile, b: &IgesFile) {
    let diffs = compare_graphs(a, b);
    assert!(diffs.is_empty(), "graphs differ:\n{}", diffs.join("\n"));
}
