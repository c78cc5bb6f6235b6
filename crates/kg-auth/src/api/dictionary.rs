//! Error Dictionary
//!
//! Pure mapping from (error code, locale) to presentable copy, consulted
//! only at the HTTP boundary. The core never touches localized text.

use crate::error::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parse a language tag such as `es` or `es-MX`. Unknown tags fall back
    /// to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.split(['-', '_']).next() {
            Some(lang) if lang.eq_ignore_ascii_case("es") => Self::Es,
            _ => Self::En,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: &'static str,
    pub detail: &'static str,
}

pub fn lookup(code: ErrorCode, locale: Locale) -> ErrorMessage {
    match locale {
        Locale::En => lookup_en(code),
        Locale::Es => lookup_es(code),
    }
}

fn lookup_en(code: ErrorCode) -> ErrorMessage {
    let (message, detail) = match code {
        ErrorCode::NameTooLong => (
            "The name is too long",
            "The name must be between 1 and 20 characters",
        ),
        ErrorCode::EmailFormatInvalid => (
            "The email format is not valid",
            "The email address must have a valid format",
        ),
        ErrorCode::PasswordTooShort => (
            "The password is too short",
            "The password must be at least 6 characters",
        ),
        ErrorCode::PasswordsNotMatch => (
            "The passwords do not match",
            "The confirmation password must match the original password",
        ),
        ErrorCode::IdFormatInvalid => (
            "The id format is not valid",
            "The id must be a valid UUID",
        ),
        ErrorCode::UserAlreadyExists => (
            "The user already exists",
            "A user with the provided email address already exists",
        ),
        ErrorCode::UserNotFound => (
            "User not found",
            "No user was found for the provided email address",
        ),
        ErrorCode::PasswordIncorrect => (
            "Incorrect password",
            "The provided password is not correct",
        ),
        ErrorCode::UserNotAuthenticated => (
            "User session not found",
            "The user does not exist or holds no active session",
        ),
        ErrorCode::TokenNotValid => (
            "Authentication not valid",
            "The provided token is not valid or has expired",
        ),
        ErrorCode::TokenGenerationFailed => (
            "Token generation failed",
            "An unexpected error occurred while generating the tokens",
        ),
        ErrorCode::TokenStorageFailed => (
            "Token storage failed",
            "An unexpected error occurred while storing the refresh token",
        ),
        ErrorCode::TokenClearingFailed => (
            "Token clearing failed",
            "An unexpected error occurred while clearing the refresh token",
        ),
        ErrorCode::RepositoryUnexpected => (
            "Unexpected data-access error",
            "An unexpected error occurred in the user directory",
        ),
        ErrorCode::HashingFailed => (
            "Credential hashing failed",
            "An unexpected error occurred while hashing credentials",
        ),
        ErrorCode::AuthHeaderNotProvided => (
            "Authorization header not provided",
            "The request did not carry a bearer authorization header",
        ),
    };
    ErrorMessage { message, detail }
}

fn lookup_es(code: ErrorCode) -> ErrorMessage {
    let (message, detail) = match code {
        ErrorCode::NameTooLong => (
            "El nombre es demasiado largo",
            "El nombre no puede exceder los 20 caracteres",
        ),
        ErrorCode::EmailFormatInvalid => (
            "El formato del correo electrónico no es válido",
            "El correo electrónico debe tener un formato válido",
        ),
        ErrorCode::PasswordTooShort => (
            "La contraseña es demasiado corta",
            "La contraseña debe tener al menos 6 caracteres",
        ),
        ErrorCode::PasswordsNotMatch => (
            "Las contraseñas no coinciden",
            "La contraseña de confirmación debe coincidir con la contraseña original",
        ),
        ErrorCode::IdFormatInvalid => (
            "El formato del ID no es válido",
            "El ID debe ser un UUID válido",
        ),
        ErrorCode::UserAlreadyExists => (
            "El usuario ya existe",
            "Ya existe un usuario con el correo electrónico proporcionado",
        ),
        ErrorCode::UserNotFound => (
            "Usuario no encontrado",
            "No se encontró el usuario con el correo electrónico proporcionado",
        ),
        ErrorCode::PasswordIncorrect => (
            "Contraseña incorrecta",
            "La contraseña proporcionada no es correcta",
        ),
        ErrorCode::UserNotAuthenticated => (
            "Acceso de usuario no encontrado",
            "No se encontró el usuario o no tiene una sesión activa",
        ),
        ErrorCode::TokenNotValid => (
            "Autenticación no válida",
            "El token proporcionado no es válido o ha expirado",
        ),
        ErrorCode::TokenGenerationFailed => (
            "Error al generar el token",
            "Ocurrió un error al generar el token de acceso",
        ),
        ErrorCode::TokenStorageFailed => (
            "Error al almacenar el token",
            "Ocurrió un error al almacenar el token de actualización",
        ),
        ErrorCode::TokenClearingFailed => (
            "Error al limpiar el token",
            "Ocurrió un error al limpiar el token de actualización",
        ),
        ErrorCode::RepositoryUnexpected => (
            "Error inesperado en el acceso a datos",
            "Ocurrió un error inesperado en el repositorio",
        ),
        ErrorCode::HashingFailed => (
            "Error al procesar credenciales",
            "Ocurrió un error inesperado al procesar las credenciales",
        ),
        ErrorCode::AuthHeaderNotProvided => (
            "Encabezado de autorización no proporcionado",
            "El encabezado de autorización no fue proporcionado en la solicitud",
        ),
    };
    ErrorMessage { message, detail }
}
