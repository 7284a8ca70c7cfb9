pub mod gemini_generate_content_response;
