//! Sabor Digital: Restaurant bounded context.
//!
//! Owns restaurants, their menus and the items on those menus. Menus and
//! menu items reference sibling aggregates in this same service; the other
//! services reference restaurants and menu items from here.

pub mod application;
pub mod domain;
