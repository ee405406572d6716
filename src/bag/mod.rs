//! Live bag model.
//!
//! A bag is one of a closed set of variants:
//!
//! - [`BoundedBag`]: governed by a [`BagType`](crate::config::BagType) and a size
//! - [`BundleBag`]: a bounded bag fixed to the built-in bundle type
//! - [`Rucksack`]: carries its own autofill and sorting preferences
//! - [`OmniBag`]: holds other bags instead of items
//!
//! [`ItemBag`] is the sum of all four. Every variant implements [`Container`],
//! which is what the snapshot encoder reads from.

mod item;
mod types;
mod variants;

pub use item::{Item, ItemQuality};
pub use types::{AutofillPriority, ContainerSize, Rectangle, SortingOrder, SortingProperty};
pub use variants::{BoundedBag, BundleBag, OmniBag, Rucksack};

/// Accessors shared by every live bag.
pub trait Container {
    /// Size classification.
    fn size(&self) -> ContainerSize;

    /// Item slots, or `None` for bags that don't hold items directly.
    fn contents(&self) -> Option<&[Option<Item>]>;

    /// Icon position currently recorded for this bag, if any.
    fn icon_position(&self) -> Option<Rectangle>;

    /// Icon position this kind of bag starts with.
    fn default_icon(&self) -> Option<Rectangle>;

    /// True unless the recorded icon differs from the default one.
    fn is_using_default_icon(&self) -> bool {
        match self.icon_position() {
            None => true,
            Some(position) => Some(position) == self.default_icon(),
        }
    }
}

/// Any live bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemBag {
    Bounded(BoundedBag),
    Bundle(BundleBag),
    Rucksack(Rucksack),
    Omni(OmniBag),
}

impl ItemBag {
    /// The bounded core of this bag. Bundle bags are bounded bags too.
    #[must_use]
    pub const fn as_bounded(&self) -> Option<&BoundedBag> {
        match self {
            Self::Bounded(bag) => Some(bag),
            Self::Bundle(bundle) => Some(&bundle.bag),
            Self::Rucksack(_) | Self::Omni(_) => None,
        }
    }

    /// Type id this bag is saved under.
    #[must_use]
    pub fn type_id(&self) -> &str {
        match self {
            Self::Bounded(bag) => &bag.type_info.id,
            Self::Bundle(_) => BundleBag::TYPE_ID,
            Self::Rucksack(_) => Rucksack::TYPE_ID,
            Self::Omni(_) => OmniBag::TYPE_ID,
        }
    }

    /// Short human-readable variant name.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bounded(_) => "bounded",
            Self::Bundle(_) => "bundle",
            Self::Rucksack(_) => "rucksack",
            Self::Omni(_) => "omni",
        }
    }

    /// Number of occupied item slots, including those of nested bags.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::Omni(omni) => omni.nested.iter().map(Self::item_count).sum(),
            other => other
                .contents()
                .map_or(0, |slots| slots.iter().flatten().count()),
        }
    }

    fn as_container(&self) -> &dyn Container {
        match self {
            Self::Bounded(bag) => bag,
            Self::Bundle(bag) => bag,
            Self::Rucksack(bag) => bag,
            Self::Omni(bag) => bag,
        }
    }
}

impl Container for ItemBag {
    fn size(&self) -> ContainerSize {
        self.as_container().size()
    }

    fn contents(&self) -> Option<&[Option<Item>]> {
        self.as_container().contents()
    }

    fn icon_position(&self) -> Option<Rectangle> {
        self.as_container().icon_position()
    }

    fn default_icon(&self) -> Option<Rectangle> {
        self.as_container().default_icon()
    }

    fn is_using_default_icon(&self) -> bool {
        self.as_container().is_using_default_icon()
    }
}

impl From<BoundedBag> for ItemBag {
    fn from(bag: BoundedBag) -> Self {
        Self::Bounded(bag)
    }
}

impl From<BundleBag> for ItemBag {
    fn from(bag: BundleBag) -> Self {
        Self::Bundle(bag)
    }
}

impl From<Rucksack> for ItemBag {
    fn from(bag: Rucksack) -> Self {
        Self::Rucksack(bag)
    }
}

impl From<OmniBag> for ItemBag {
    fn from(bag: OmniBag) -> Self {
        Self::Omni(bag)
    }
}
