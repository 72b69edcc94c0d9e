use timechat_models::ImageGenerationParams;

/// Base endpoint for deterministic image generation URLs.
pub const IMAGE_API_URL: &str = "https://image.pollinations.ai/prompt";

/// Token embedded in image URLs when the client has none configured.
pub const FALLBACK_IMAGE_TOKEN: &str = "Cf5zT0TTvLLEskfY";

/// Build the image URL for a resolved `generate_image` call.
///
/// The prompt and the optional reference URL are percent-encoded; everything
/// else is fixed query parameters understood by the image endpoint.
pub fn generate_image_url(
    params: &ImageGenerationParams,
    token: Option<&str>,
    reference_image_url: Option<&str>,
) -> String {
    let encoded_prompt = urlencoding::encode(&params.prompt);
    let token = token.unwrap_or(FALLBACK_IMAGE_TOKEN);

    let mut url = format!(
        "{}/{}?width={}&height={}&enhance=true&nologo=true&model=gptimage&token={}",
        IMAGE_API_URL, encoded_prompt, params.width, params.height, token
    );

    if let Some(reference) = reference_image_url {
        url.push_str("&image=");
        url.push_str(&urlencoding::encode(reference));
    }

    url
}

/// The markdown fragment appended to the visible message text.
pub fn image_markdown(
    params: &ImageGenerationParams,
    token: Option<&str>,
    reference_image_url: Option<&str>,
) -> String {
    format!(
        "![Generated Image]({})",
        generate_image_url(params, token, reference_image_url)
    )
}
