use crate::models::AttributeSet;

/// Builds the generation prompt for one attribute snapshot.
///
/// The output depends only on `attrs`, so identical snapshots always yield
/// byte-identical prompts.
pub fn compose(attrs: &AttributeSet) -> String {
    let mut prompt = String::new();

    prompt.push_str("Create a high-end, photorealistic fashion studio photograph.\n\n");

    prompt.push_str(&format!(
        "SUBJECT: A {} {} model with {} skin tone.\n\n",
        attrs.age_group, attrs.gender, attrs.skin_tone
    ));

    prompt.push_str(
        "CLOTHING: The model is wearing the EXACT clothing item provided in the input image.\n\
         The clothing must fit perfectly on the model's body with realistic fabric drapes, shadows, folds, and texture.\n\
         The clothing type, pattern, and color must match the input image exactly.\n\n",
    );

    prompt.push_str(&format!(
        "POSE & SETTING: The model is posing in a {} stance.\n",
        attrs.pose
    ));
    prompt.push_str(&format!("CAMERA ANGLE: The camera view is {}.\n", attrs.view));
    prompt.push_str(&format!("The overall style is {}.\n", attrs.style));
    prompt.push_str(
        "The background is a neutral, professional studio backdrop with soft, high-quality lighting emphasizing the product details.\n\n",
    );

    prompt.push_str(
        "QUALITY: Masterpiece, 8k, highly detailed, commercial fashion photography, vogue style, sharp focus, cinematic lighting.",
    );

    prompt
}
