mod persistence;

pub use persistence::{
    clear_profile, clear_recommendations, load_profile, load_recommendations,
    load_recommendations_or_none, save_profile, save_recommendations,
};
