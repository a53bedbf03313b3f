//! Impulse response for one overlapping pair.
//!
//! Every shape pair reduces to a [`Contact`]; [`resolve_contact`] is the only
//! place velocities and positions change. Which side owns the contact is fixed
//! by [`resolver_for`]: discs own disc/rectangle pairs, polygons own every
//! pair they are in, and rectangle-rectangle belongs to the first rectangle.

use tracing::trace;

use crate::api::ShapeApi;
use crate::body::Body;
use crate::shape::Shape;
use crate::types::*;

/// Which side of an ordered pair computes and applies the contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolver {
    First,
    Second,
}

/// The fixed 3×3 ownership table.
pub fn resolver_for(a: ShapeKind, b: ShapeKind) -> Resolver {
    use ShapeKind::*;
    match (a, b) {
        (Disc, Disc) | (Disc, Rectangle) | (Rectangle, Rectangle) => Resolver::First,
        (Rectangle, Disc) | (Disc, Polygon) | (Rectangle, Polygon) => Resolver::Second,
        (Polygon, _) => Resolver::First,
    }
}

/// Apply restitution impulse and positional correction for `contact`, whose
/// normal points from `a` toward `b`.
///
/// Returns false, touching nothing, when the bodies are already separating or
/// resting along the normal.
pub fn resolve_contact(a: &mut Body, b: &mut Body, contact: &Contact) -> bool {
    let n = contact.normal;
    let vel_along_normal = (b.velocity - a.velocity).dot(n);
    if vel_along_normal >= 0.0 {
        return false;
    }

    let e = a.restitution.min(b.restitution);
    // Raw masses on purpose: a static partner still contributes its mass here.
    let j = -(1.0 + e) * vel_along_normal / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = n * (j * contact.impulse_scale);
    a.apply_impulse(-impulse);
    b.apply_impulse(impulse);

    match contact.correction {
        Correction::HalfSplit => {
            if contact.depth > 0.0 {
                let half = n * (contact.depth * 0.5);
                a.translate(-half);
                b.translate(half);
            }
        }
        Correction::MassRatio { slop } => {
            if contact.depth > 0.0 {
                let total = a.mass + b.mass;
                let dist = contact.depth + slop;
                a.translate(-n * (dist * b.mass / total));
                b.translate(n * (dist * a.mass / total));
            }
        }
        Correction::Fixed(dist) => {
            a.translate(-n * dist);
            b.translate(n * dist);
        }
    }
    true
}

impl Shape {
    /// Resolve against `other` with `self` as the owning side.
    ///
    /// Returns the applied contact, or `None` if the pair does not overlap or is
    /// already separating.
    pub fn resolve(&mut self, other: &mut Shape, rect_impulse_bias: bool) -> Option<Contact> {
        let mut contact = self.contact(other)?;
        if !rect_impulse_bias {
            contact.impulse_scale = 1.0;
        }
        resolve_contact(self.body_mut(), other.body_mut(), &contact).then_some(contact)
    }
}

/// Resolve an ordered pair through the ownership table.
pub fn resolve_pair(a: &mut Shape, b: &mut Shape, rect_impulse_bias: bool) -> Option<Contact> {
    let (ka, kb) = (a.kind(), b.kind());
    let applied = match resolver_for(ka, kb) {
        Resolver::First => a.resolve(b, rect_impulse_bias),
        Resolver::Second => b.resolve(a, rect_impulse_bias),
    };
    if let Some(c) = &applied {
        trace!(?ka, ?kb, normal = ?c.normal, depth = c.depth, "contact resolved");
    }
    applied
}
