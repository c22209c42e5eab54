use std::{collections::HashMap, sync::Arc};

use futures::lock::Mutex;

use crate::{Comment, Post, Report, User};

database_derived!(
    /// Reference implementation
    #[derive(Default)]
    pub struct ReferenceDb {
        pub users: Arc<Mutex<HashMap<String, User>>>,
        pub posts: Arc<Mutex<HashMap<String, Post>>>,
        pub comments: Arc<Mutex<HashMap<String, Comment>>>,
        pub reports: Arc<Mutex<HashMap<String, Report>>>,
    }
);
