//! Code generation for the mirrored halves of the rebalancing algorithms.

/// Generate a rotation method. `$near` is the side the pivot moves down to,
/// `$far` the side its replacement comes up from: `rotation!(rotate_left,
/// left, right)` lifts `x.right` above `x`.
macro_rules! rotation {
    ($(#[$attr:meta])* $name:ident, $near:ident, $far:ident) => {
        paste::paste! {
            $(#[$attr])*
            pub(crate) fn $name(&mut self, x: NodeId) {
                let y = self.$far(x);
                let inner = self.$near(y);
                self.[<set_ $far>](x, inner);
                self.set_parent(inner, x);
                let parent = self.parent(x);
                self.set_parent(y, parent);
                self.replace_child(parent, x, y);
                self.[<set_ $near>](y, x);
                self.set_parent(x, y);
            }
        }
    };
}
