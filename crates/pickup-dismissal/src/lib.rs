//! # Pickup Dismissal
//!
//! In-memory coordination of the end-of-day pickup queue.
//!
//! Parents check in and name the students they are collecting; each request
//! is assigned to a teacher (or to the "Mixed Classes" / "Unknown Teacher"
//! buckets), gets a queue position, and waits until a teacher releases it.
//! Every mutation is narrated in a bounded activity feed.
//!
//! ```text
//! Directory ─► roster::resolve_assignment ─► QueueLedger ─► ActivityLog
//!     ▲                                           ▲              ▲
//!     └──────────────── TeacherSession ───────────┴──────────────┘
//! ```
//!
//! [`Dismissal`] bundles the components into one context object. It is not
//! synchronized; a multi-client server wraps it in a single lock so that
//! position allocation and feed truncation stay atomic.
//!
//! # Example
//!
//! ```ignore
//! use pickup_dismissal::{CheckIn, Directory, Dismissal, TeacherSession};
//! use pickup_models::PickupMethod;
//!
//! let mut dismissal = Dismissal::builder(Directory::sample()).build();
//! let check_in = CheckIn::new("Sarah Johnson", ["Emma Rodriguez"], PickupMethod::CarLine)?;
//! let request = dismissal.check_in(check_in);
//! assert_eq!(request.assigned_teacher_label, "Mrs. Johnson");
//!
//! let mut session = TeacherSession::default();
//! dismissal.login(&mut session, "3333")?;
//! assert_eq!(dismissal.my_queue(&session).len(), 1);
//! ```

pub mod activity;
pub mod directory;
pub mod dismissal;
pub mod error;
pub mod ledger;
pub mod roster;
pub mod sample;
pub mod session;
pub mod tickets;

pub use activity::{ACTIVITY_LOG_CAPACITY, ActivityLog};
pub use directory::Directory;
pub use dismissal::{Dismissal, DismissalBuilder};
pub use error::DismissalError;
pub use ledger::{CheckIn, QueueLedger};
pub use roster::{Assignment, assignment_kind, may_release, resolve_assignment};
pub use session::TeacherSession;
pub use tickets::{RandomTicketIssuer, TicketIssuer};
