//! Database integration tests.

use super::*;
use crate::bundle::SourceBundle;
use crate::models::{Permission, Visibility};
use crate::test_support::{account, draft, setup_temp_db};
