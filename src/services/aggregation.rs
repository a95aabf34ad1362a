//! Per-place review aggregation
//!
//! Turns a place's raw review list into a `PlaceSummary`: average rating,
//! dominant category, and the classified reviews themselves. Only favorable
//! reviews (rating at or above the qualifying threshold) are sent to the
//! classifier; everything else is marked NotApplicable without a call.

use crate::{
    error::AppResult,
    models::{Category, ClassifiedReview, Place, PlaceSummary, Review, ReviewCategory},
    services::providers::ReviewClassifier,
};

/// Minimum rating for a review to qualify for classification and
/// category-count aggregation
pub const QUALIFYING_RATING: f64 = 4.0;

/// Aggregates a place's reviews into a summary
///
/// Classifier failures propagate to the caller; the pipeline has a single
/// top-level error boundary and no per-review recovery. The summary's score
/// is left at zero for the ranker to fill in.
pub async fn summarize_place(
    place: Place,
    reviews: Vec<Review>,
    classifier: &dyn ReviewClassifier,
) -> AppResult<PlaceSummary> {
    let mut ratings = Vec::new();
    let mut classified_reviews = Vec::with_capacity(reviews.len());

    for review in reviews {
        if let Some(rating) = review.rating {
            ratings.push(rating);
        }

        let category = match review.rating {
            Some(rating) if rating >= QUALIFYING_RATING => classifier.classify(&review.text).await?,
            // Unfavorable or unrated reviews are never classified
            _ => ReviewCategory::NotApplicable,
        };

        classified_reviews.push(ClassifiedReview {
            text: review.text,
            rating: review.rating,
            category,
        });
    }

    let overall_average = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    let dominant_category = dominant_category(&classified_reviews);

    Ok(PlaceSummary {
        place,
        classified_reviews,
        overall_average,
        dominant_category,
        score: 0.0,
    })
}

/// Category with the highest count among classified qualifying reviews
///
/// Counts are kept in first-encounter order and ties go to the earlier
/// category, so the result is deterministic given the review order.
fn dominant_category(reviews: &[ClassifiedReview]) -> ReviewCategory {
    let mut counts: Vec<(Category, usize)> = Vec::new();

    for review in reviews {
        if let Some(category) = review.category.as_category() {
            match counts.iter_mut().find(|(c, _)| *c == category) {
                Some((_, count)) => *count += 1,
                None => counts.push((category, 1)),
            }
        }
    }

    let mut best: Option<(Category, usize)> = None;
    for (category, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((category, count)),
        }
    }

    ReviewCategory::from(best.map(|(category, _)| category))
}
